/// Power-up drops, pickups and falling movement.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{GameState, Mode, Powerup, PowerupKind, TimedPower};
use crate::events::{GameEvent, SfxCue};
use crate::geometry::{clamp, overlaps, pick};

/// Roll a drop at (`x`, `y`). Higher `wave_hint` means better odds,
/// clamped to the configured band.
pub fn maybe_drop_powerup(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    x: f32,
    y: f32,
    wave_hint: u32,
) -> bool {
    let tuning = &cfg.powerups;
    let chance = clamp(
        tuning.base_chance + wave_hint as f32 * tuning.chance_per_wave_hint,
        tuning.min_chance,
        tuning.max_chance,
    );
    if rng.gen::<f32>() > chance {
        return false;
    }
    let Some(&kind) = pick(&PowerupKind::ALL, rng) else {
        return false;
    };
    state.powerups.push(Powerup {
        x,
        y,
        w: tuning.size,
        h: tuning.size,
        vy: tuning.fall_speed,
        kind,
    });
    true
}

/// Wave-mode drop with anti-streak pacing: a per-wave minimum number of
/// kills since the last drop and a short cooldown after each drop.
pub fn maybe_drop_wave_powerup(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    x: f32,
    y: f32,
) {
    if state.boss.is_some() || state.mode != Mode::Playing {
        return;
    }
    if state.wave_drop_cooldown > 0.0 {
        return;
    }
    let pacing = &cfg.wave_drop_pacing;
    let wave_index = cfg.wave_index(state.wave);
    if state.wave_kills_since_drop < pacing.min_kills(wave_index) {
        return;
    }
    let chance = clamp(
        pacing.base_chance + wave_index as f32 * pacing.wave_chance_step,
        pacing.min_chance,
        pacing.max_chance,
    );
    if rng.gen::<f32>() > chance {
        return;
    }
    maybe_drop_powerup(state, cfg, rng, x, y, wave_index as u32);
    state.wave_drop_cooldown = pacing.cooldown(wave_index);
    state.wave_kills_since_drop = 0;
}

fn stack_power(power: &mut TimedPower, seconds: f32, max_level: u8) {
    power.active = true;
    power.duration += seconds;
    power.level = (power.level + 1).clamp(1, max_level);
}

/// Grant a picked-up power-up. Durations stack, levels cap, shields add.
pub fn apply_powerup(state: &mut GameState, cfg: &GameConfig, kind: PowerupKind) {
    let tuning = &cfg.powerups;
    let player = &mut state.player;
    match kind {
        PowerupKind::RapidFire => {
            stack_power(&mut player.rapid, tuning.rapid_fire_seconds, tuning.max_level)
        }
        PowerupKind::SpreadShot => {
            stack_power(&mut player.spread, tuning.spread_shot_seconds, tuning.max_level)
        }
        PowerupKind::Shield => player.shield_hits += tuning.shield_hits_per_pickup,
    }
    state.events.push(GameEvent::Sfx(SfxCue::Pickup));
}

pub fn update_powerups(state: &mut GameState, cfg: &GameConfig, dt: f32) {
    for p in &mut state.powerups {
        p.y += p.vy * dt;
    }
    let floor = cfg.height + cfg.bullet_cull_padding;
    state.powerups.retain(|p| p.y < floor);

    let player = state.player.clone();
    let (picked, falling): (Vec<Powerup>, Vec<Powerup>) = state
        .powerups
        .drain(..)
        .partition(|p| overlaps(p, &player));
    state.powerups = falling;
    for p in picked {
        apply_powerup(state, cfg, p.kind);
    }
}
