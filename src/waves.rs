/// Grid-formation enemy waves.

use std::f32::consts::TAU;

use rand::Rng;
use tracing::info;

use crate::config::GameConfig;
use crate::entities::{Enemy, EnemyVariant, GameState, Projectile, ShotSource};
use crate::flow::{self, LossOptions};
use crate::geometry::pick;

/// Lay out a `(2 + wave) x (7 + wave)` formation and reset wave pacing.
pub fn spawn_wave(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, wave: u32) {
    let rows = 2 + wave;
    let cols = 7 + wave;
    let layout = &cfg.waves;
    let variant = EnemyVariant::for_wave(wave);

    state.enemies.clear();
    for row in 0..rows {
        for col in 0..cols {
            state.enemies.push(Enemy {
                x: layout.start_x + col as f32 * layout.gap_x,
                y: layout.start_y + row as f32 * layout.gap_y,
                w: layout.enemy_w,
                h: layout.enemy_h,
                alive: true,
                variant,
                anim_phase: rng.gen::<f32>() * TAU,
                shot_bias: 0.8 + rng.gen::<f32>() * 0.5,
            });
        }
    }
    state.enemy_dir = 1.0;
    state.enemy_speed = 54.0 + wave as f32 * 16.0;
    state.enemy_descend = layout.descend_step;
    state.enemy_shot_timer = (1.15 - wave as f32 * 0.17).max(0.25);
    state.wave_drop_cooldown = 0.0;
    state.wave_kills_since_drop = cfg.wave_drop_pacing.min_kills(cfg.wave_index(wave));
    info!(wave, enemies = state.enemies.len(), "wave spawned");
}

/// A single straight-down shot from a formation enemy.
pub fn shoot_enemy(state: &mut GameState, x: f32, y: f32, speed_multiplier: f32) {
    state.bullets_enemy.push(Projectile {
        x,
        y: y + 14.0,
        w: 6.0,
        h: 16.0,
        vx: 0.0,
        vy: 220.0 * speed_multiplier,
        damage: 1,
        source: ShotSource::EnemyWave,
    });
}

pub fn update_enemy_wave(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, dt: f32) {
    if state.enemies.is_empty() {
        return;
    }

    let step = state.enemy_dir * state.enemy_speed * dt;
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.x += step;
        min_x = min_x.min(enemy.x - enemy.w / 2.0);
        max_x = max_x.max(enemy.x + enemy.w / 2.0);
    }

    let margin = cfg.waves.edge_margin;
    if min_x <= margin || max_x >= cfg.width - margin {
        state.enemy_dir = -state.enemy_dir;
        let descend = state.enemy_descend;
        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            enemy.y += descend;
        }
    }

    let loss_line = cfg.height - cfg.waves.loss_line_offset;
    if state
        .enemies
        .iter()
        .any(|e| e.alive && e.y + e.h / 2.0 >= loss_line)
    {
        info!(wave = state.wave, "formation reached the loss line");
        flow::trigger_loss(state, LossOptions::default());
        return;
    }

    state.enemy_shot_timer = (state.enemy_shot_timer - dt).max(0.0);
    if state.enemy_shot_timer <= 0.0 {
        let alive: Vec<(f32, f32)> = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| (e.x, e.y))
            .collect();
        if let Some(&(x, y)) = pick(&alive, rng) {
            shoot_enemy(state, x, y, 1.0 + state.wave as f32 * 0.12);
        }
        state.enemy_shot_timer = (1.08 - state.wave as f32 * 0.15).max(0.22);
    }
}
