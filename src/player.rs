/// Player ship: movement, firing, power-up timers and taking hits.

use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{GameState, Mode, Projectile, ShotSource, TimedPower};
use crate::events::{GameEvent, SfxCue};
use crate::flow::{self, LossOptions};
use crate::geometry::clamp;

/// Start the shake/flash/flicker feedback unless it fired very recently.
pub fn trigger_damage_feedback(state: &mut GameState, cfg: &GameConfig) {
    let fx = &mut state.hit_fx;
    if fx.cooldown_timer > 0.0 {
        return;
    }
    let tuning = &cfg.player_hit_fx;
    fx.shake_timer = tuning.shake_duration;
    fx.flash_timer = tuning.flash_duration;
    fx.flicker_timer = tuning.flicker_duration;
    fx.cooldown_timer = tuning.retrigger_cooldown;
}

/// Spread levels add symmetric angle pairs around straight up.
fn spread_angles(level: u8) -> Vec<f32> {
    let mut angles = vec![0.0];
    for (min_level, angle) in [(1u8, 0.2f32), (2, 0.35), (3, 0.5)] {
        if level >= min_level {
            angles.push(-angle);
            angles.push(angle);
        }
    }
    angles
}

/// Fire a volley if the cooldown allows it.
pub fn shoot(state: &mut GameState, cfg: &GameConfig) {
    let player = &mut state.player;
    if player.shot_cooldown > 0.0 {
        return;
    }
    let rapid_factor = if player.rapid.active {
        1.0 + f32::from(player.rapid.level) * cfg.player.rapid_factor_per_level
    } else {
        1.0
    };
    let spread_level = if player.spread.active { player.spread.level } else { 0 };
    let speed = cfg.player.bullet_speed;

    for angle in spread_angles(spread_level) {
        state.bullets_player.push(Projectile {
            x: player.x,
            y: player.y - player.h * 0.6,
            w: 6.0,
            h: 16.0,
            vx: angle.sin() * speed,
            vy: -angle.cos() * speed,
            damage: 1,
            source: ShotSource::Player,
        });
    }
    player.shot_cooldown = cfg.player.base_shot_cooldown / rapid_factor;
    state.events.push(GameEvent::Sfx(SfxCue::Shoot));
}

/// Apply `damage` to the player: shield stock absorbs one point per hit
/// first, anything left comes off `lives`. Running out of lives opens the
/// continue prompt during a boss fight and ends the run otherwise.
pub fn consume_player_hit(state: &mut GameState, cfg: &GameConfig, damage: u32) {
    let absorbed = damage.min(state.player.shield_hits);
    state.player.shield_hits -= absorbed;
    let pending = damage - absorbed;
    if pending == 0 {
        return;
    }

    trigger_damage_feedback(state, cfg);
    state.player.lives = (state.player.lives - pending as i32).max(0);
    debug!(lives = state.player.lives, damage = pending, "player hit");

    if state.player.lives <= 0 {
        let opts = LossOptions { play_game_over: true };
        if state.boss.is_some() && state.mode == Mode::Playing {
            flow::show_continue_prompt(state, cfg, opts);
        } else {
            flow::trigger_loss(state, opts);
        }
    }
}

fn tick_power(power: &mut TimedPower, dt: f32) {
    if !power.active {
        return;
    }
    power.duration = (power.duration - dt).max(0.0);
    if power.duration <= 0.0 {
        power.active = false;
        power.level = 0;
    }
}

pub fn update_player(state: &mut GameState, cfg: &GameConfig, dt: f32) {
    let input = state.input;
    let player = &mut state.player;
    player.vx = 0.0;
    if input.left {
        player.vx = -player.speed;
    }
    if input.right {
        player.vx = player.speed;
    }
    player.x = clamp(
        player.x + player.vx * dt,
        player.w * 0.6,
        cfg.width - player.w * 0.6,
    );
    player.shot_cooldown = (player.shot_cooldown - dt).max(0.0);

    if input.shoot {
        shoot(state, cfg);
    }

    tick_power(&mut state.player.rapid, dt);
    tick_power(&mut state.player.spread, dt);
}
