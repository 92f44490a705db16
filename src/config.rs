/// Tuning tables for the whole game.
///
/// Every number the simulation reads lives here so a JSON file can
/// override any subset of it (`#[serde(default)]` on every struct).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const GAME_TITLE: &str = "Starfall Protocol";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub layer_hp: Vec<f32>,
    pub evolution_layer_index: usize,
    pub start_y: f32,
    pub offscreen_y: f32,
    pub base_w: f32,
    pub base_h: f32,
    pub base_speed: f32,
    pub initial_shot_timer: f32,
    pub spawn_minion_timer: f32,
    /// Minion cadence once spawning has started (phase 2 onward).
    pub minion_spawn_interval: f32,
    pub enraged_minion_spawn_interval: f32,
    /// Shot timer a retried phase starts with: phases 0-1, then later ones.
    pub checkpoint_shot_timer_early: f32,
    pub checkpoint_shot_timer_late: f32,
    pub checkpoint_minion_timer: f32,
    pub enraged_checkpoint_minion_timer: f32,
    /// Shot timer after a transition is `phase_start_shot_timer - layer * step`.
    pub phase_start_shot_timer: f32,
    pub phase_start_shot_timer_step: f32,
    pub entrance_duration: f32,
    pub retry_entrance_duration: f32,
    pub entrance_target_y: f32,
    pub grace_duration: f32,
    pub initial_reveal_alpha: f32,
    pub entrance_reveal_alpha: f32,
    pub entrance_shot_timer: f32,
    pub transition_duration: f32,
    pub evolution_duration: f32,
    pub mutated_scale: f32,
    pub mutation_speed_bonus: f32,
    /// Combat movement speed per phase; the last entry covers later phases.
    pub phase_speeds: Vec<f32>,
    pub mutated_move_bonus: f32,
    pub enraged_move_bonus: f32,
    pub edge_margin: f32,
    /// Multiplier on damage *taken* while enraged.
    pub enrage_damage_taken_multiplier: f32,
    /// Damage carried by boss projectiles once enraged.
    pub enraged_shot_damage: u32,
    pub layer_break_score: u32,
    pub counter_punish_cooldown: f32,
    pub hit_flash: f32,
    pub minion_hp: f32,
    pub enraged_minion_hp: f32,
    pub minion_kill_score: u32,
    pub player_bullet_damage: f32,
    pub player_bullet_minion_damage: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        BossConfig {
            layer_hp: vec![120.0, 130.0, 150.0, 170.0],
            evolution_layer_index: 2,
            start_y: 120.0,
            offscreen_y: -170.0,
            base_w: 225.0,
            base_h: 336.0,
            base_speed: 130.0,
            initial_shot_timer: 0.9,
            spawn_minion_timer: 3.6,
            minion_spawn_interval: 6.2,
            enraged_minion_spawn_interval: 4.8,
            checkpoint_shot_timer_early: 0.68,
            checkpoint_shot_timer_late: 0.86,
            checkpoint_minion_timer: 3.8,
            enraged_checkpoint_minion_timer: 2.8,
            phase_start_shot_timer: 0.74,
            phase_start_shot_timer_step: 0.06,
            entrance_duration: 2.8,
            retry_entrance_duration: 2.25,
            entrance_target_y: 120.0,
            grace_duration: 1.25,
            initial_reveal_alpha: 0.12,
            entrance_reveal_alpha: 0.1,
            entrance_shot_timer: 0.95,
            transition_duration: 1.05,
            evolution_duration: 2.8,
            mutated_scale: 1.35,
            mutation_speed_bonus: 36.0,
            phase_speeds: vec![132.0, 162.0, 194.0, 225.0],
            mutated_move_bonus: 24.0,
            enraged_move_bonus: 40.0,
            edge_margin: 70.0,
            enrage_damage_taken_multiplier: 1.45,
            enraged_shot_damage: 2,
            layer_break_score: 400,
            counter_punish_cooldown: 0.2,
            hit_flash: 0.14,
            minion_hp: 18.0,
            enraged_minion_hp: 26.0,
            minion_kill_score: 150,
            player_bullet_damage: 4.0,
            player_bullet_minion_damage: 8.0,
        }
    }
}

impl BossConfig {
    pub fn phase_speed(&self, phase: usize) -> f32 {
        self.phase_speeds
            .get(phase)
            .or_else(|| self.phase_speeds.last())
            .copied()
            .unwrap_or(self.base_speed)
    }
}

// ── Waves ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub enemy_w: f32,
    pub enemy_h: f32,
    pub edge_margin: f32,
    pub descend_step: f32,
    pub kill_score: u32,
    /// Distance above the viewport bottom at which an invading enemy ends
    /// the run. Zero means the enemy's lower edge must touch the bottom.
    pub loss_line_offset: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        WaveConfig {
            start_x: 108.0,
            start_y: 86.0,
            gap_x: 72.0,
            gap_y: 56.0,
            enemy_w: 34.0,
            enemy_h: 24.0,
            edge_margin: 40.0,
            descend_step: 20.0,
            kill_score: 100,
            loss_line_offset: 0.0,
        }
    }
}

/// Soft anti-streak control for wave-mode drops, indexed by wave number.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WaveDropPacing {
    pub base_chance: f32,
    pub wave_chance_step: f32,
    pub min_chance: f32,
    pub max_chance: f32,
    pub min_kills_between_drops_by_wave: Vec<u32>,
    pub cooldown_seconds_by_wave: Vec<f32>,
}

impl Default for WaveDropPacing {
    fn default() -> Self {
        WaveDropPacing {
            base_chance: 3.0,
            wave_chance_step: 1.5,
            min_chance: 3.0,
            max_chance: 7.0,
            min_kills_between_drops_by_wave: vec![0, 0, 0, 1, 1],
            cooldown_seconds_by_wave: vec![0.0, 0.1, 0.2, 0.3, 0.4],
        }
    }
}

impl WaveDropPacing {
    pub fn min_kills(&self, wave: usize) -> u32 {
        self.min_kills_between_drops_by_wave
            .get(wave)
            .copied()
            .unwrap_or(0)
    }

    pub fn cooldown(&self, wave: usize) -> f32 {
        self.cooldown_seconds_by_wave.get(wave).copied().unwrap_or(0.0)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerHitFxConfig {
    pub shake_duration: f32,
    pub shake_amplitude: f32,
    pub flash_duration: f32,
    pub flash_alpha: f32,
    pub flicker_duration: f32,
    pub retrigger_cooldown: f32,
}

impl Default for PlayerHitFxConfig {
    fn default() -> Self {
        PlayerHitFxConfig {
            shake_duration: 0.12,
            shake_amplitude: 3.0,
            flash_duration: 0.1,
            flash_alpha: 0.28,
            flicker_duration: 0.16,
            retrigger_cooldown: 0.11,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub lives: i32,
    pub bottom_offset: f32,
    pub base_shot_cooldown: f32,
    pub rapid_factor_per_level: f32,
    pub bullet_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            w: 44.0,
            h: 28.0,
            speed: 340.0,
            lives: 3,
            bottom_offset: 56.0,
            base_shot_cooldown: 0.28,
            rapid_factor_per_level: 0.7,
            bullet_speed: 520.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    pub rapid_fire_seconds: f32,
    pub spread_shot_seconds: f32,
    pub shield_hits_per_pickup: u32,
    pub max_level: u8,
    pub fall_speed: f32,
    pub size: f32,
    pub base_chance: f32,
    pub chance_per_wave_hint: f32,
    pub min_chance: f32,
    pub max_chance: f32,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        PowerupConfig {
            rapid_fire_seconds: 10.0,
            spread_shot_seconds: 10.0,
            shield_hits_per_pickup: 2,
            max_level: 3,
            fall_speed: 82.0,
            size: 24.0,
            base_chance: 0.14,
            chance_per_wave_hint: 0.018,
            min_chance: 0.14,
            max_chance: 0.34,
        }
    }
}

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub total_waves: u32,
    pub continue_prompt_seconds: f32,
    pub frame_dt: f32,
    pub max_frame_dt: f32,
    pub bullet_cull_padding: f32,
    pub reveal_seconds: f32,
    pub final_clue: String,
    pub star_count: usize,
    pub boss: BossConfig,
    pub waves: WaveConfig,
    pub wave_drop_pacing: WaveDropPacing,
    pub player: PlayerConfig,
    pub player_hit_fx: PlayerHitFxConfig,
    pub powerups: PowerupConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 960.0,
            height: 720.0,
            total_waves: 4,
            continue_prompt_seconds: 10.0,
            frame_dt: 1.0 / 60.0,
            max_frame_dt: 0.033,
            bullet_cull_padding: 40.0,
            reveal_seconds: 4.6,
            final_clue: "happiness".to_string(),
            star_count: 130,
            boss: BossConfig::default(),
            waves: WaveConfig::default(),
            wave_drop_pacing: WaveDropPacing::default(),
            player: PlayerConfig::default(),
            player_hit_fx: PlayerHitFxConfig::default(),
            powerups: PowerupConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.total_waves == 0 {
            return Err(ConfigError::Invalid("total_waves must be at least 1".into()));
        }
        if self.boss.layer_hp.is_empty() {
            return Err(ConfigError::Invalid("boss needs at least one layer".into()));
        }
        if let Some(hp) = self.boss.layer_hp.iter().find(|hp| **hp <= 0.0) {
            return Err(ConfigError::Invalid(format!("boss layer hp must be positive, got {hp}")));
        }
        if self.frame_dt <= 0.0 || self.max_frame_dt <= 0.0 {
            return Err(ConfigError::Invalid("frame timings must be positive".into()));
        }
        if self.powerups.max_level == 0 {
            return Err(ConfigError::Invalid("powerup max_level must be at least 1".into()));
        }
        Ok(())
    }

    pub fn boss_start_x(&self) -> f32 {
        self.width * 0.5
    }

    /// Clamp a wave number into the pacing tables' 1..=total_waves range.
    pub fn wave_index(&self, wave: u32) -> usize {
        wave.clamp(1, self.total_waves) as usize
    }
}
