/// Plain data for everything in the game world, plus small derived queries.

use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::geometry::{Hitbox, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Start,
    Playing,
    ContinuePrompt,
    Reveal,
    End,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Start => "start",
            Mode::Playing => "playing",
            Mode::ContinuePrompt => "continue_prompt",
            Mode::Reveal => "reveal",
            Mode::End => "end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Win,
    Lose,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::Win => "win",
            EndReason::Lose => "lose",
        }
    }
}

/// Held-key flags, polled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// A stackable timed power-up (rapid fire / spread shot).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimedPower {
    pub active: bool,
    /// Seconds remaining.
    pub duration: f32,
    /// 0 while inactive, otherwise 1..=max level.
    pub level: u8,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub vx: f32,
    pub lives: i32,
    pub shot_cooldown: f32,
    pub shield_hits: u32,
    pub rapid: TimedPower,
    pub spread: TimedPower,
}

impl Player {
    pub fn new(cfg: &GameConfig) -> Self {
        Player {
            x: cfg.width * 0.5,
            y: cfg.height - cfg.player.bottom_offset,
            w: cfg.player.w,
            h: cfg.player.h,
            speed: cfg.player.speed,
            vx: 0.0,
            lives: cfg.player.lives,
            shot_cooldown: 0.0,
            shield_hits: 0,
            rapid: TimedPower::default(),
            spread: TimedPower::default(),
        }
    }
}

impl Hitbox for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Damage-feedback timers keyed off player hits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitFx {
    pub shake_timer: f32,
    pub flash_timer: f32,
    pub flicker_timer: f32,
    pub cooldown_timer: f32,
}

// ── Wave enemies ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyVariant {
    Scout,
    Raider,
    Striker,
    Warden,
}

impl EnemyVariant {
    pub fn for_wave(wave: u32) -> Self {
        match wave {
            1 => EnemyVariant::Scout,
            2 => EnemyVariant::Raider,
            3 => EnemyVariant::Striker,
            _ => EnemyVariant::Warden,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub alive: bool,
    pub variant: EnemyVariant,
    pub anim_phase: f32,
    pub shot_bias: f32,
}

impl Hitbox for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Projectiles & pickups ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotSource {
    Player,
    EnemyWave,
    BossSpread,
    BossAimed,
    BossLance,
    BossConstrictor,
    BossMinion,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: u32,
    pub source: ShotSource,
}

impl Hitbox for Projectile {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerupKind {
    RapidFire,
    Shield,
    SpreadShot,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::RapidFire,
        PowerupKind::Shield,
        PowerupKind::SpreadShot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PowerupKind::RapidFire => "rapid_fire",
            PowerupKind::Shield => "shield",
            PowerupKind::SpreadShot => "spread_shot",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Powerup {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vy: f32,
    pub kind: PowerupKind,
}

impl Hitbox for Powerup {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub size: f32,
}

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub speed: f32,
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// One segment of the boss health bar. `0 <= hp <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    pub max: f32,
    pub hp: f32,
}

impl Layer {
    pub fn full(max: f32) -> Self {
        Layer { max, hp: max }
    }

    pub fn is_broken(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Lifecycle state of a live boss. Defeat removes the boss entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossPhase {
    Entrance { timer: f32, duration: f32 },
    Grace { timer: f32 },
    Combat,
    Transition { timer: f32, next_layer: usize },
    Evolving { timer: f32, duration: f32, next_layer: usize },
}

/// Attack profile keyed to the current layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackPattern {
    Spread,
    Mixed,
    Mutant,
    Enraged,
}

impl AttackPattern {
    pub fn for_phase(phase: usize) -> Self {
        match phase {
            0 => AttackPattern::Spread,
            1 => AttackPattern::Mixed,
            2 => AttackPattern::Mutant,
            _ => AttackPattern::Enraged,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttackPattern::Spread => "spread",
            AttackPattern::Mixed => "mixed",
            AttackPattern::Mutant => "mutant",
            AttackPattern::Enraged => "enraged",
        }
    }
}

/// A committed attack waiting for its windup to expire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingAttack {
    pub pattern: AttackPattern,
    pub cycle: u32,
    pub damage: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Windup {
    pub attack: PendingAttack,
    pub timer: f32,
    pub duration: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Burst {
    pub shots: u32,
    pub interval: f32,
    pub timer: f32,
}

/// Restore point captured whenever a combat phase begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseCheckpoint {
    pub layer_index: usize,
    pub layer_hp: f32,
    pub x: f32,
    pub y: f32,
    pub dir: f32,
    pub shot_timer: f32,
    pub minion_spawn_timer: f32,
    /// Attack counter at phase start; phases 2+ alternate on its parity.
    pub attack_cycle: u32,
    pub mutated: bool,
    pub enraged: bool,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub scale: f32,
    pub speed: f32,
    pub dir: f32,
    pub layers: Vec<Layer>,
    pub current_layer: usize,
    pub evolution_layer_index: usize,
    pub phase: BossPhase,
    pub mutated: bool,
    pub enraged: bool,
    pub mutation_progress: f32,
    pub shot_timer: f32,
    pub shield_timer: f32,
    pub counter_punish_timer: f32,
    pub attack_lock_timer: f32,
    pub windup: Option<Windup>,
    pub burst: Burst,
    pub attack_cycle: u32,
    pub minion_spawn_timer: f32,
    pub layer_break_fx_timer: f32,
    pub flash_timer: f32,
    pub phase_banner_timer: f32,
    pub shake_amount: f32,
    pub flicker_timer: f32,
    pub flicker_alpha: f32,
    pub reveal_alpha: f32,
    pub particles: Vec<Particle>,
    pub checkpoint: PhaseCheckpoint,
}

impl Boss {
    /// Entrance, transition and evolution all reject damage.
    pub fn is_invulnerable(&self) -> bool {
        matches!(
            self.phase,
            BossPhase::Entrance { .. } | BossPhase::Transition { .. } | BossPhase::Evolving { .. }
        )
    }

    pub fn is_evolving(&self) -> bool {
        matches!(self.phase, BossPhase::Evolving { .. })
    }

    pub fn in_transition(&self) -> bool {
        matches!(self.phase, BossPhase::Transition { .. })
    }

    pub fn entrance_active(&self) -> bool {
        matches!(self.phase, BossPhase::Entrance { .. })
    }

    pub fn grace_active(&self) -> bool {
        matches!(self.phase, BossPhase::Grace { .. })
    }

    pub fn next_layer(&self) -> Option<usize> {
        match self.phase {
            BossPhase::Transition { next_layer, .. } | BossPhase::Evolving { next_layer, .. } => {
                Some(next_layer)
            }
            _ => None,
        }
    }

    pub fn is_final_layer(&self) -> bool {
        self.current_layer + 1 >= self.layers.len()
    }

    pub fn active_layer(&self) -> Layer {
        self.layers[self.current_layer]
    }

    pub fn shot_damage(&self, enraged_damage: u32) -> u32 {
        if self.enraged {
            enraged_damage
        } else {
            1
        }
    }
}

impl Hitbox for Boss {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Clone, Debug)]
pub struct Minion {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub hp: f32,
    pub speed: f32,
    pub shot_timer: f32,
    pub pulse: f32,
}

impl Hitbox for Minion {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Particle burst left behind when the boss goes down.
#[derive(Clone, Debug)]
pub struct BossDefeatFx {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub timer: f32,
    pub duration: f32,
    pub completed: bool,
    pub particles: Vec<Particle>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The aggregate root. Owns every entity collection; replaced wholesale
/// on start/restart (input and queued events carry over).
#[derive(Clone, Debug)]
pub struct GameState {
    pub mode: Mode,
    pub end_reason: Option<EndReason>,
    pub score: u32,
    pub wave: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub enemy_dir: f32,
    pub enemy_speed: f32,
    pub enemy_descend: f32,
    pub enemy_shot_timer: f32,
    pub bullets_player: Vec<Projectile>,
    pub bullets_enemy: Vec<Projectile>,
    pub powerups: Vec<Powerup>,
    pub boss: Option<Boss>,
    pub boss_minions: Vec<Minion>,
    pub wave_drop_cooldown: f32,
    pub wave_kills_since_drop: u32,
    pub hit_fx: HitFx,
    pub continue_timer: f32,
    pub boss_defeat_fx: Option<BossDefeatFx>,
    pub reveal_timer: f32,
    pub transition_alpha: f32,
    pub revealed_clue: Option<String>,
    pub loop_time: f32,
    pub input: InputState,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(cfg: &GameConfig) -> Self {
        GameState {
            mode: Mode::Start,
            end_reason: None,
            score: 0,
            wave: 1,
            player: Player::new(cfg),
            enemies: Vec::new(),
            enemy_dir: 1.0,
            enemy_speed: 60.0,
            enemy_descend: cfg.waves.descend_step,
            enemy_shot_timer: 1.0,
            bullets_player: Vec::new(),
            bullets_enemy: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            boss_minions: Vec::new(),
            wave_drop_cooldown: 0.0,
            wave_kills_since_drop: 0,
            hit_fx: HitFx::default(),
            continue_timer: 0.0,
            boss_defeat_fx: None,
            reveal_timer: 0.0,
            transition_alpha: 0.0,
            revealed_clue: None,
            loop_time: 0.0,
            input: InputState::default(),
            events: Vec::new(),
        }
    }

    /// Swap in a fresh state in `mode`, keeping input and pending events.
    pub fn reset(&mut self, cfg: &GameConfig, mode: Mode) {
        let input = self.input;
        let events = std::mem::take(&mut self.events);
        *self = GameState::new(cfg);
        self.mode = mode;
        self.input = input;
        self.events = events;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
