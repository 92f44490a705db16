/// Top-level mode transitions: start, loss, the boss-only continue
/// prompt, and the victory reveal.
///
/// Every entry point is safe to call in any mode. Calls that make no
/// sense for the current mode are ignored or fall back to a loss.

use rand::Rng;
use tracing::info;

use crate::boss::respawn_at_checkpoint;
use crate::config::GameConfig;
use crate::entities::{EndReason, GameState, InputState, Mode};
use crate::events::{BgmTrack, GameEvent};
use crate::geometry::clamp;
use crate::waves::spawn_wave;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LossOptions {
    /// Play the game-over sting instead of fading the music out.
    pub play_game_over: bool,
}

pub fn start_game(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng) {
    state.reset(cfg, Mode::Playing);
    state.emit(GameEvent::PlayBgm {
        track: BgmTrack::Wave,
        fade_ms: 280,
    });
    let wave = state.wave;
    spawn_wave(state, cfg, rng, wave);
    info!("game started");
}

/// Back to the start screen with a fresh state.
pub fn restart(state: &mut GameState, cfg: &GameConfig) {
    state.reset(cfg, Mode::Start);
}

pub fn trigger_loss(state: &mut GameState, opts: LossOptions) {
    state.mode = Mode::End;
    state.end_reason = Some(EndReason::Lose);
    state.bullets_enemy.clear();
    state.bullets_player.clear();
    state.powerups.clear();
    state.boss_minions.clear();
    if opts.play_game_over {
        state.emit(GameEvent::PlayBgm {
            track: BgmTrack::GameOver,
            fade_ms: 160,
        });
    } else {
        state.emit(GameEvent::StopBgm { fade_ms: 220 });
    }
    info!(score = state.score, wave = state.wave, "run lost");
}

/// Offer a retry from the boss checkpoint. Only valid mid boss fight;
/// anywhere else this is a plain loss.
pub fn show_continue_prompt(state: &mut GameState, cfg: &GameConfig, opts: LossOptions) {
    if state.boss.is_none() || state.mode != Mode::Playing {
        trigger_loss(state, LossOptions::default());
        return;
    }
    state.mode = Mode::ContinuePrompt;
    state.continue_timer = cfg.continue_prompt_seconds;
    state.input = InputState::default();
    state.bullets_enemy.clear();
    state.bullets_player.clear();
    if opts.play_game_over {
        state.emit(GameEvent::PlayBgm {
            track: BgmTrack::GameOver,
            fade_ms: 160,
        });
    } else {
        state.emit(GameEvent::StopBgm { fade_ms: 180 });
    }
    info!(seconds = state.continue_timer, "continue prompt shown");
}

pub fn choose_continue_yes(state: &mut GameState, cfg: &GameConfig) {
    if state.mode != Mode::ContinuePrompt {
        return;
    }
    state.mode = Mode::Playing;
    state.continue_timer = 0.0;
    state.emit(GameEvent::StopBgm { fade_ms: 0 });
    respawn_at_checkpoint(state, cfg);
    state.emit(GameEvent::PlayBgm {
        track: BgmTrack::Boss,
        fade_ms: 0,
    });
}

pub fn choose_continue_no(state: &mut GameState, cfg: &GameConfig) {
    if state.mode != Mode::ContinuePrompt {
        return;
    }
    state.continue_timer = 0.0;
    state.emit(GameEvent::StopBgm { fade_ms: 120 });
    info!("continue declined");
    restart(state, cfg);
}

/// Count the prompt down; running out is the same as declining.
pub fn update_continue_prompt(state: &mut GameState, cfg: &GameConfig, dt: f32) {
    state.continue_timer = (state.continue_timer - dt).max(0.0);
    if state.continue_timer <= 0.0 {
        choose_continue_no(state, cfg);
    }
}

/// Let the defeat burst play out, reveal the clue, then finish as a win.
pub fn update_reveal(state: &mut GameState, cfg: &GameConfig, dt: f32) {
    state.reveal_timer += dt;
    state.transition_alpha = clamp(state.transition_alpha + dt * 0.6, 0.0, 1.0);

    if let Some(fx) = state.boss_defeat_fx.as_mut().filter(|fx| !fx.completed) {
        fx.timer = (fx.timer + dt).min(fx.duration);
        for p in &mut fx.particles {
            p.life -= dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.vy += 360.0 * dt;
            p.vx *= 0.985;
            p.vy *= 0.985;
        }
        fx.particles.retain(|p| p.life > 0.0);
        if fx.timer >= fx.duration && fx.particles.is_empty() {
            fx.completed = true;
        }
    }

    let fx_done = state.boss_defeat_fx.as_ref().map_or(true, |fx| fx.completed);
    if state.revealed_clue.is_none() && fx_done {
        state.revealed_clue = Some(cfg.final_clue.clone());
    }
    if state.revealed_clue.is_some() && state.reveal_timer > cfg.reveal_seconds {
        state.mode = Mode::End;
        state.end_reason = Some(EndReason::Win);
        info!(score = state.score, "run won");
    }
}
