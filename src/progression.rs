/// The `Playing` frame: subsystem updates in a fixed order, then the
/// wave-clear / boss-spawn check.

use rand::Rng;

use crate::boss::{spawn_boss, update_boss};
use crate::combat::{handle_collisions, update_bullets};
use crate::config::GameConfig;
use crate::entities::{GameState, Mode};
use crate::player::update_player;
use crate::powerups::update_powerups;
use crate::waves::{spawn_wave, update_enemy_wave};

pub fn update_playing(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, dt: f32) {
    if state.boss.is_none() {
        state.wave_drop_cooldown = (state.wave_drop_cooldown - dt).max(0.0);
    }
    update_player(state, cfg, dt);
    update_enemy_wave(state, cfg, rng, dt);
    update_boss(state, cfg, rng, dt);
    update_powerups(state, cfg, dt);
    update_bullets(state, cfg, dt);
    handle_collisions(state, cfg, rng);

    if state.mode != Mode::Playing {
        return;
    }

    if state.boss.is_none() && state.enemies.is_empty() {
        if state.wave < cfg.total_waves {
            state.wave += 1;
            let wave = state.wave;
            spawn_wave(state, cfg, rng, wave);
        } else {
            spawn_boss(state, cfg);
        }
    }
}
