/// The simulation driver.
///
/// `Game` owns the state, the tuning and the random source, and is the
/// only thing a front end talks to: feed it input, call `frame` (real
/// time) or `advance_time` (deterministic), drain the queued events, and
/// read a snapshot back.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::audio::AudioStatus;
use crate::config::GameConfig;
use crate::effects::{make_star_field, update_hit_feedback, update_stars};
use crate::entities::{GameState, InputState, Mode, Star};
use crate::events::GameEvent;
use crate::flow::{self, LossOptions};
use crate::geometry::clamp;
use crate::progression::update_playing;
use crate::snapshot::StateSnapshot;

pub struct Game<R = ChaCha8Rng> {
    pub state: GameState,
    pub cfg: GameConfig,
    pub stars: Vec<Star>,
    rng: R,
    deterministic: bool,
}

impl Game<ChaCha8Rng> {
    pub fn with_seed(cfg: GameConfig, seed: u64) -> Self {
        Game::new(cfg, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(cfg: GameConfig) -> Self {
        Game::new(cfg, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn new(cfg: GameConfig, mut rng: R) -> Self {
        let stars = make_star_field(&cfg, &mut rng);
        Game {
            state: GameState::new(&cfg),
            cfg,
            stars,
            rng,
            deterministic: false,
        }
    }

    /// One fixed step. `dt` is clamped to `[0, max_frame_dt]`.
    pub fn tick(&mut self, dt: f32) {
        let dt = clamp(dt, 0.0, self.cfg.max_frame_dt);
        let state = &mut self.state;
        state.loop_time += dt;
        update_stars(&mut self.stars, &self.cfg, &mut self.rng, dt);
        update_hit_feedback(&mut state.hit_fx, dt);
        match state.mode {
            Mode::Playing => update_playing(state, &self.cfg, &mut self.rng, dt),
            Mode::ContinuePrompt => flow::update_continue_prompt(state, &self.cfg, dt),
            Mode::Reveal => flow::update_reveal(state, &self.cfg, dt),
            Mode::Start | Mode::End => {}
        }
    }

    /// Real-time step with the wall-clock delta since the previous frame.
    /// Ignored once the game has been switched to deterministic stepping.
    pub fn frame(&mut self, real_dt: f32) {
        if !self.deterministic {
            self.tick(real_dt);
        }
    }

    /// Switch to deterministic mode and advance `ms` of game time in
    /// `frame_dt` steps (at least one).
    pub fn advance_time(&mut self, ms: f32) {
        self.deterministic = true;
        let step_ms = self.cfg.frame_dt * 1000.0;
        let steps = (ms / step_ms).round().max(1.0) as u32;
        debug!(ms, steps, "advancing time");
        for _ in 0..steps {
            self.tick(self.cfg.frame_dt);
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn set_input(&mut self, input: InputState) {
        self.state.input = input;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    // ── UI entry points ───────────────────────────────────────────────────────

    pub fn start_game(&mut self) {
        flow::start_game(&mut self.state, &self.cfg, &mut self.rng);
    }

    pub fn restart(&mut self) {
        flow::restart(&mut self.state, &self.cfg);
    }

    pub fn choose_continue_yes(&mut self) {
        flow::choose_continue_yes(&mut self.state, &self.cfg);
    }

    pub fn choose_continue_no(&mut self) {
        flow::choose_continue_no(&mut self.state, &self.cfg);
    }

    pub fn trigger_loss(&mut self, opts: LossOptions) {
        flow::trigger_loss(&mut self.state, opts);
    }

    pub fn show_continue_prompt(&mut self, opts: LossOptions) {
        flow::show_continue_prompt(&mut self.state, &self.cfg, opts);
    }

    pub fn snapshot(&self, audio: AudioStatus) -> StateSnapshot {
        StateSnapshot::capture(&self.state, &self.cfg, audio)
    }
}
