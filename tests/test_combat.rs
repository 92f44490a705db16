use starfall::boss::spawn_boss;
use starfall::combat::*;
use starfall::config::GameConfig;
use starfall::entities::*;
use starfall::events::{GameEvent, SfxCue};

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn playing_state(cfg: &GameConfig) -> GameState {
    let mut state = GameState::new(cfg);
    state.mode = Mode::Playing;
    state
}

fn bullet(x: f32, y: f32, vy: f32, source: ShotSource) -> Projectile {
    Projectile {
        x,
        y,
        w: 6.0,
        h: 16.0,
        vx: 0.0,
        vy,
        damage: 1,
        source,
    }
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        w: 34.0,
        h: 24.0,
        alive: true,
        variant: EnemyVariant::Raider,
        anim_phase: 0.0,
        shot_bias: 1.0,
    }
}

fn minion_at(x: f32, y: f32, hp: f32) -> Minion {
    Minion {
        x,
        y,
        w: 26.0,
        h: 22.0,
        hp,
        speed: 88.0,
        shot_timer: 1.0,
        pulse: 0.0,
    }
}

fn boss_in_combat(cfg: &GameConfig) -> GameState {
    let mut state = playing_state(cfg);
    spawn_boss(&mut state, cfg);
    let boss = state.boss.as_mut().unwrap();
    boss.phase = BossPhase::Combat;
    boss.x = 480.0;
    boss.y = 200.0;
    state
}

// ── update_bullets ────────────────────────────────────────────────────────────

#[test]
fn bullets_move_and_offscreen_ones_are_culled() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.bullets_player.push(bullet(100.0, 300.0, -520.0, ShotSource::Player));
    state.bullets_player.push(bullet(100.0, -30.0, -520.0, ShotSource::Player));
    state.bullets_enemy.push(bullet(100.0, 700.0, 300.0, ShotSource::EnemyWave));

    update_bullets(&mut state, &cfg, 0.1);

    assert_eq!(state.bullets_player.len(), 1);
    assert_relative_eq!(state.bullets_player[0].y, 248.0);
    assert_eq!(state.bullets_enemy.len(), 1);
    assert_relative_eq!(state.bullets_enemy[0].y, 730.0);
}

// ── enemy fire ────────────────────────────────────────────────────────────────

#[test]
fn enemy_bullet_costs_a_life() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    let (px, py) = (state.player.x, state.player.y);
    state.bullets_enemy.push(bullet(px, py, 220.0, ShotSource::EnemyWave));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    assert_eq!(state.player.lives, 2);
    assert!(state.bullets_enemy.is_empty());
}

#[test]
fn fatal_hit_stops_collision_processing() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.lives = 1;
    let (px, py) = (state.player.x, state.player.y);
    state.bullets_enemy.push(bullet(px, py, 220.0, ShotSource::EnemyWave));
    state.bullets_enemy.push(bullet(px, py, 220.0, ShotSource::EnemyWave));
    state.enemies.push(enemy_at(300.0, 200.0));
    state.bullets_player.push(bullet(300.0, 200.0, -520.0, ShotSource::Player));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    assert_eq!(state.mode, Mode::End);
    assert_eq!(state.player.lives, 0);
    assert_eq!(state.score, 0);
    assert!(state.enemies[0].alive);
}

// ── player fire in waves ──────────────────────────────────────────────────────

#[test]
fn player_bullet_destroys_wave_enemy() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy_at(300.0, 200.0));
    state.enemies.push(enemy_at(600.0, 200.0));
    state.bullets_player.push(bullet(300.0, 200.0, -520.0, ShotSource::Player));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].x, 600.0);
    assert!(state.bullets_player.is_empty());
    assert_eq!(state.score, 100);
    assert!(state.events.contains(&GameEvent::Sfx(SfxCue::Explosion)));
    // wave 1 has no kill minimum, so the drop gate ran and reset pacing
    assert_eq!(state.wave_kills_since_drop, 0);
    assert_relative_eq!(state.wave_drop_cooldown, 0.1);
}

#[test]
fn bullet_that_misses_keeps_flying() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.enemies.push(enemy_at(300.0, 200.0));
    state.bullets_player.push(bullet(500.0, 400.0, -520.0, ShotSource::Player));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    assert_eq!(state.bullets_player.len(), 1);
    assert_eq!(state.enemies.len(), 1);
}

// ── player fire against the boss ──────────────────────────────────────────────

#[test]
fn minion_soaks_the_bullet_before_the_boss() {
    let cfg = GameConfig::default();
    let mut state = boss_in_combat(&cfg);
    state.boss_minions.push(minion_at(480.0, 200.0, 18.0));
    state.bullets_player.push(bullet(480.0, 200.0, -520.0, ShotSource::Player));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    assert_eq!(state.boss_minions.len(), 1);
    assert_relative_eq!(state.boss_minions[0].hp, 10.0);
    assert_eq!(state.boss.as_ref().unwrap().layers[0].hp, 120.0);
    assert!(state.bullets_player.is_empty());
}

#[test]
fn killing_a_minion_scores() {
    let cfg = GameConfig::default();
    let mut state = boss_in_combat(&cfg);
    state.boss_minions.push(minion_at(480.0, 200.0, 8.0));
    state.bullets_player.push(bullet(480.0, 200.0, -520.0, ShotSource::Player));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    assert!(state.boss_minions.is_empty());
    assert_eq!(state.score, 150);
}

#[test]
fn bullet_on_the_boss_body_damages_the_active_layer() {
    let cfg = GameConfig::default();
    let mut state = boss_in_combat(&cfg);
    state.bullets_player.push(bullet(480.0, 200.0, -520.0, ShotSource::Player));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    let boss = state.boss.as_ref().unwrap();
    assert_eq!(boss.layers[0].hp, 116.0);
    assert_relative_eq!(boss.flash_timer, 0.14);
    assert!(state.bullets_player.is_empty());
}

#[test]
fn bullet_on_an_invulnerable_boss_is_still_consumed() {
    let cfg = GameConfig::default();
    let mut state = boss_in_combat(&cfg);
    state.boss.as_mut().unwrap().phase = BossPhase::Transition {
        timer: 0.5,
        next_layer: 1,
    };
    state.bullets_player.push(bullet(480.0, 200.0, -520.0, ShotSource::Player));

    handle_collisions(&mut state, &cfg, &mut seeded_rng());

    assert_eq!(state.boss.as_ref().unwrap().layers[0].hp, 120.0);
    assert!(state.bullets_player.is_empty());
}
