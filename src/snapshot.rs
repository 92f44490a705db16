/// Serializable readout of the game for scripted runs and debugging.
/// Nothing in the simulation reads it back.

use serde::Serialize;

use crate::audio::AudioStatus;
use crate::config::GameConfig;
use crate::entities::{Boss, GameState, Mode, PowerupKind, TimedPower};
use crate::events::BgmTrack;

const COORDINATE_SYSTEM: &str =
    "origin top-left, +x right, +y down; units are world pixels";
const ENEMY_SAMPLE: usize = 8;

fn round_to(value: f32, places: i32) -> f32 {
    let scale = 10f32.powi(places);
    (value * scale).round() / scale
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub lives: i32,
    pub shield_hits: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PowerSnapshot {
    pub level: u8,
    pub duration_s: f32,
}

impl PowerSnapshot {
    fn from_power(power: &TimedPower) -> Option<Self> {
        power.active.then(|| PowerSnapshot {
            level: power.level,
            duration_s: round_to(power.duration, 2),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActivePowerups {
    pub rapid_fire: Option<PowerSnapshot>,
    pub spread_shot: Option<PowerSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnemySnapshot {
    pub count: usize,
    pub sample: Vec<Position>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BossSnapshot {
    pub x: f32,
    pub y: f32,
    /// 1-based for display.
    pub current_layer: usize,
    pub total_layers: usize,
    pub active_layer_hp: f32,
    pub active_layer_hp_max: f32,
    pub layers_remaining: usize,
    pub evolving: bool,
    pub mutated: bool,
    pub enraged: bool,
    pub invulnerable: bool,
    pub entrance_active: bool,
    pub grace_active: bool,
    pub minions: usize,
}

impl BossSnapshot {
    fn from_boss(boss: &Boss, minions: usize) -> Self {
        let layer = boss.active_layer();
        BossSnapshot {
            x: round_to(boss.x, 1),
            y: round_to(boss.y, 1),
            current_layer: boss.current_layer + 1,
            total_layers: boss.layers.len(),
            active_layer_hp: round_to(layer.hp, 1).max(0.0),
            active_layer_hp_max: layer.max,
            layers_remaining: boss.layers.len() - boss.current_layer,
            evolving: boss.is_evolving(),
            mutated: boss.mutated,
            enraged: boss.enraged,
            invulnerable: boss.is_invulnerable(),
            entrance_active: boss.entrance_active(),
            grace_active: boss.grace_active(),
            minions,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FallingPowerup {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub coordinate_system: &'static str,
    pub mode: &'static str,
    pub end_reason: Option<&'static str>,
    pub wave: u32,
    pub total_waves: u32,
    pub score: u32,
    pub player: PlayerSnapshot,
    pub active_powerups: ActivePowerups,
    pub enemies: EnemySnapshot,
    pub boss: Option<BossSnapshot>,
    pub player_bullets: usize,
    pub enemy_bullets: usize,
    pub falling_powerups: Vec<FallingPowerup>,
    pub clue_visible: bool,
    pub continue_timer: Option<f32>,
    pub bgm_track: Option<BgmTrack>,
    pub bgm_volume: f32,
    pub sfx_volume: f32,
}

impl StateSnapshot {
    pub fn capture(state: &GameState, cfg: &GameConfig, audio: AudioStatus) -> Self {
        let player = &state.player;
        StateSnapshot {
            coordinate_system: COORDINATE_SYSTEM,
            mode: state.mode.as_str(),
            end_reason: state.end_reason.map(|r| r.as_str()),
            wave: state.wave,
            total_waves: cfg.total_waves,
            score: state.score,
            player: PlayerSnapshot {
                x: round_to(player.x, 1),
                y: round_to(player.y, 1),
                vx: round_to(player.vx, 1),
                lives: player.lives,
                shield_hits: player.shield_hits,
            },
            active_powerups: ActivePowerups {
                rapid_fire: PowerSnapshot::from_power(&player.rapid),
                spread_shot: PowerSnapshot::from_power(&player.spread),
            },
            enemies: EnemySnapshot {
                count: state.enemies.len(),
                sample: state
                    .enemies
                    .iter()
                    .take(ENEMY_SAMPLE)
                    .map(|e| Position {
                        x: round_to(e.x, 1),
                        y: round_to(e.y, 1),
                    })
                    .collect(),
            },
            boss: state
                .boss
                .as_ref()
                .map(|b| BossSnapshot::from_boss(b, state.boss_minions.len())),
            player_bullets: state.bullets_player.len(),
            enemy_bullets: state.bullets_enemy.len(),
            falling_powerups: state
                .powerups
                .iter()
                .map(|p| FallingPowerup {
                    kind: PowerupKind::as_str(p.kind),
                    x: round_to(p.x, 1),
                    y: round_to(p.y, 1),
                })
                .collect(),
            clue_visible: state.revealed_clue.is_some(),
            continue_timer: (state.mode == Mode::ContinuePrompt)
                .then(|| round_to(state.continue_timer, 2)),
            bgm_track: audio.track,
            bgm_volume: round_to(audio.bgm_volume, 2),
            sfx_volume: round_to(audio.sfx_volume, 2),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
