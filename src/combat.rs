/// Bullet advancement and per-frame collision resolution.

use rand::Rng;

use crate::boss::damage_boss;
use crate::config::GameConfig;
use crate::entities::{GameState, Mode, Projectile};
use crate::events::{GameEvent, SfxCue};
use crate::geometry::overlaps;
use crate::player::consume_player_hit;
use crate::powerups::{maybe_drop_powerup, maybe_drop_wave_powerup};

fn in_bounds(b: &Projectile, cfg: &GameConfig) -> bool {
    let pad = cfg.bullet_cull_padding;
    b.y > -pad && b.y < cfg.height + pad && b.x > -pad && b.x < cfg.width + pad
}

/// Move every projectile by `velocity * dt` and drop the ones that left
/// the padded viewport.
pub fn update_bullets(state: &mut GameState, cfg: &GameConfig, dt: f32) {
    for b in state
        .bullets_player
        .iter_mut()
        .chain(state.bullets_enemy.iter_mut())
    {
        b.x += b.vx * dt;
        b.y += b.vy * dt;
    }
    state.bullets_player.retain(|b| in_bounds(b, cfg));
    state.bullets_enemy.retain(|b| in_bounds(b, cfg));
}

/// Resolve the frame's hits in a fixed order: enemy fire against the
/// player first (stopping early if that ends play), then each player
/// bullet against at most one target.
pub fn handle_collisions(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng) {
    for i in (0..state.bullets_enemy.len()).rev() {
        if i >= state.bullets_enemy.len() {
            continue;
        }
        if overlaps(&state.bullets_enemy[i], &state.player) {
            let bullet = state.bullets_enemy.remove(i);
            consume_player_hit(state, cfg, bullet.damage);
            if state.mode != Mode::Playing {
                return;
            }
        }
    }

    for i in (0..state.bullets_player.len()).rev() {
        if i >= state.bullets_player.len() {
            continue;
        }
        let bullet = state.bullets_player[i].clone();
        let hit = if state.boss.is_some() {
            hit_boss_targets(state, cfg, rng, &bullet)
        } else {
            hit_wave_enemy(state, cfg, rng, &bullet)
        };
        if hit && i < state.bullets_player.len() {
            state.bullets_player.remove(i);
        }
    }

    state.enemies.retain(|e| e.alive);
}

/// Minions shield the boss body: the first overlapping minion takes the
/// bullet, otherwise the boss does.
fn hit_boss_targets(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    bullet: &Projectile,
) -> bool {
    for m in (0..state.boss_minions.len()).rev() {
        if !overlaps(bullet, &state.boss_minions[m]) {
            continue;
        }
        state.boss_minions[m].hp -= cfg.boss.player_bullet_minion_damage;
        if state.boss_minions[m].hp <= 0.0 {
            let minion = state.boss_minions.remove(m);
            state.score += cfg.boss.minion_kill_score;
            let hint = state.wave + 2;
            maybe_drop_powerup(state, cfg, rng, minion.x, minion.y, hint);
        }
        return true;
    }

    let body_hit = state
        .boss
        .as_ref()
        .is_some_and(|boss| overlaps(bullet, boss));
    if body_hit {
        damage_boss(state, cfg, rng, cfg.boss.player_bullet_damage);
    }
    body_hit
}

fn hit_wave_enemy(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    bullet: &Projectile,
) -> bool {
    let Some(enemy) = state
        .enemies
        .iter_mut()
        .find(|e| e.alive && overlaps(bullet, &**e))
    else {
        return false;
    };
    enemy.alive = false;
    let (x, y) = (enemy.x, enemy.y);
    state.score += cfg.waves.kill_score;
    state.wave_kills_since_drop += 1;
    maybe_drop_wave_powerup(state, cfg, rng, x, y);
    state.emit(GameEvent::Sfx(SfxCue::Explosion));
    true
}
