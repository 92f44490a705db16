/// Projectile spawners, minions and particle bursts used by the boss.
///
/// Nothing here knows about phases; the state machine in `boss` decides
/// what to fire and when.

use std::f32::consts::TAU;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Boss, GameState, Minion, Mode, Particle, Player, Projectile, ShotSource};
use crate::geometry::{clamp, jitter, overlaps};
use crate::player::consume_player_hit;
use crate::powerups::maybe_drop_powerup;

/// Fan of `count` shots spanning `[-arc, arc]` radians around straight down.
pub fn fire_spread(
    boss: &Boss,
    bullets: &mut Vec<Projectile>,
    count: u32,
    arc: f32,
    speed: f32,
    damage: u32,
) {
    for i in 0..count {
        let t = if count == 1 {
            0.5
        } else {
            i as f32 / (count - 1) as f32
        };
        let angle = -arc + t * arc * 2.0;
        bullets.push(Projectile {
            x: boss.x,
            y: boss.y + boss.h * 0.34,
            w: 8.0,
            h: 18.0,
            vx: angle.sin() * speed,
            vy: angle.cos() * speed,
            damage,
            source: ShotSource::BossSpread,
        });
    }
}

/// One shot aimed at the player's current position.
pub fn fire_aimed(
    boss: &Boss,
    bullets: &mut Vec<Projectile>,
    target: &Player,
    speed: f32,
    damage: u32,
) {
    let sx = boss.x;
    let sy = boss.y + boss.h * 0.3;
    let dx = target.x - sx;
    let dy = target.y - sy;
    let length = dx.hypot(dy).max(1.0);
    bullets.push(Projectile {
        x: sx,
        y: sy,
        w: 9.0,
        h: 18.0,
        vx: dx / length * speed,
        vy: dy / length * speed,
        damage,
        source: ShotSource::BossAimed,
    });
}

/// A pair of heavy shots from the boss flanks, angled slightly outward.
pub fn fire_lances(boss: &Boss, bullets: &mut Vec<Projectile>, speed: f32, damage: u32) {
    for side in [-1.0f32, 1.0] {
        bullets.push(Projectile {
            x: boss.x + side * boss.w * 0.34,
            y: boss.y + boss.h * 0.26,
            w: 10.0,
            h: 20.0,
            vx: side * speed * 0.24,
            vy: speed,
            damage,
            source: ShotSource::BossLance,
        });
    }
}

/// Evenly spaced vertical lanes across the whole screen width.
pub fn fire_constrictor(
    boss: &Boss,
    bullets: &mut Vec<Projectile>,
    width: f32,
    lanes: u32,
    speed: f32,
    damage: u32,
) {
    for i in 1..=lanes {
        bullets.push(Projectile {
            x: width / (lanes + 1) as f32 * i as f32,
            y: boss.y + boss.h * 0.22,
            w: 8.0,
            h: 20.0,
            vx: 0.0,
            vy: speed,
            damage,
            source: ShotSource::BossConstrictor,
        });
    }
}

pub fn spawn_minion(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    let hp = if boss.enraged {
        cfg.boss.enraged_minion_hp
    } else {
        cfg.boss.minion_hp
    };
    let minion = Minion {
        x: clamp(boss.x + jitter(rng) * boss.w * 0.9, 32.0, cfg.width - 32.0),
        y: boss.y + boss.h * 0.32,
        w: 26.0,
        h: 22.0,
        hp,
        speed: 88.0 + boss.current_layer as f32 * 16.0 + if boss.enraged { 22.0 } else { 0.0 },
        shot_timer: 0.75 + rng.gen::<f32>() * 0.45,
        pulse: rng.gen::<f32>() * TAU,
    };
    state.boss_minions.push(minion);
}

/// Advance minions. While `paused` they hold position and do not fire,
/// but still despawn and still hurt the player on contact. Stops at the
/// first contact that ends play.
pub fn update_minions(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    dt: f32,
    paused: bool,
) {
    let (enraged, layer) = state
        .boss
        .as_ref()
        .map(|b| (b.enraged, b.current_layer))
        .unwrap_or((false, 0));
    let shot_speed = 260.0 + if enraged { 80.0 } else { 30.0 };
    let shot_damage = if enraged { cfg.boss.enraged_shot_damage } else { 1 };

    for i in (0..state.boss_minions.len()).rev() {
        if i >= state.boss_minions.len() {
            continue;
        }
        if !paused {
            let minion = &mut state.boss_minions[i];
            minion.y += minion.speed * dt;
            minion.x += (state.loop_time * 3.0 + minion.pulse).sin() * 18.0 * dt;
            minion.shot_timer -= dt;
            if minion.shot_timer <= 0.0 {
                let dx = state.player.x - minion.x;
                let dy = state.player.y - minion.y;
                let len = dx.hypot(dy).max(1.0);
                state.bullets_enemy.push(Projectile {
                    x: minion.x,
                    y: minion.y + minion.h * 0.3,
                    w: 7.0,
                    h: 14.0,
                    vx: dx / len * shot_speed,
                    vy: dy / len * shot_speed,
                    damage: shot_damage,
                    source: ShotSource::BossMinion,
                });
                minion.shot_timer =
                    (0.6 + rng.gen::<f32>() * 0.35 - layer as f32 * 0.06).max(0.0);
            }
        }

        let minion = &state.boss_minions[i];
        if minion.y - minion.h / 2.0 > cfg.height + 40.0 || minion.hp <= 0.0 {
            state.boss_minions.remove(i);
            continue;
        }
        if overlaps(minion, &state.player) {
            state.boss_minions.remove(i);
            consume_player_hit(state, cfg, 1);
            if state.mode != Mode::Playing {
                return;
            }
        }
    }
}

fn burst_particles(
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
    count: usize,
    origin: (f32, f32, f32, f32),
) {
    let (x, y, w, h) = origin;
    particles.extend((0..count).map(|_| Particle {
        x: x + jitter(rng) * w * 0.4,
        y: y + jitter(rng) * h * 0.4,
        vx: jitter(rng) * 220.0,
        vy: jitter(rng) * 220.0,
        life: 0.4 + rng.gen::<f32>() * 0.6,
        size: 2.0 + rng.gen::<f32>() * 3.0,
    }));
}

pub fn spawn_break_particles(boss: &mut Boss, rng: &mut impl Rng, count: usize) {
    let origin = (boss.x, boss.y, boss.w, boss.h);
    burst_particles(&mut boss.particles, rng, count, origin);
}

/// Small chance of a mid-fight drop scattered under the boss.
pub fn maybe_drop_combat_powerup(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    chance: f32,
) {
    let Some((bx, by, bw, bh)) = state.boss.as_ref().map(|b| (b.x, b.y, b.w, b.h)) else {
        return;
    };
    if rng.gen::<f32>() >= chance {
        return;
    }
    let x = clamp(bx + jitter(rng) * (bw * 0.9).min(220.0), 48.0, cfg.width - 48.0);
    let y = by + bh * 0.35;
    let hint = state.wave + 3;
    maybe_drop_powerup(state, cfg, rng, x, y, hint);
}
