/// Boss lifecycle: entrance → grace → combat phases, with transitions,
/// a one-time evolution, enrage on the final layer, defeat, and the
/// continue-checkpoint restore.
///
/// The boss is `state.boss`; `BossPhase` is its only lifecycle state, so
/// "evolving during entrance" and similar combinations cannot exist.

pub mod attacks;

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    AttackPattern, Boss, BossDefeatFx, BossPhase, Burst, GameState, Layer, Mode, Particle,
    PendingAttack, PhaseCheckpoint, Player, Windup,
};
use crate::events::{BgmTrack, GameEvent, SfxCue};
use crate::flow::{self, LossOptions};
use crate::geometry::{clamp, jitter};
use crate::powerups::maybe_drop_powerup;

use attacks::{
    fire_aimed, fire_constrictor, fire_lances, fire_spread, maybe_drop_combat_powerup,
    spawn_break_particles, spawn_minion, update_minions,
};

const LAYER_BREAK_FX: f32 = 1.15;
const LAYER_BREAK_FLASH: f32 = 0.18;
const DEFEAT_PARTICLES: usize = 36;
const DEFEAT_FX_SECONDS: f32 = 1.35;

fn windup_duration(pattern: AttackPattern) -> f32 {
    match pattern {
        AttackPattern::Spread => 0.22,
        AttackPattern::Mixed => 0.28,
        AttackPattern::Mutant => 0.34,
        AttackPattern::Enraged => 0.36,
    }
}

fn apply_scale(boss: &mut Boss, cfg: &GameConfig, scale: f32) {
    let scale = scale.max(0.01);
    boss.scale = scale;
    boss.w = cfg.boss.base_w * scale;
    boss.h = cfg.boss.base_h * scale;
}

fn phase_checkpoint(boss: &Boss, cfg: &GameConfig) -> PhaseCheckpoint {
    PhaseCheckpoint {
        layer_index: boss.current_layer,
        layer_hp: boss.layers.get(boss.current_layer).map_or(0.0, |l| l.max),
        x: cfg.boss_start_x(),
        y: cfg.boss.start_y,
        dir: 1.0,
        shot_timer: if boss.current_layer <= 1 {
            cfg.boss.checkpoint_shot_timer_early
        } else {
            cfg.boss.checkpoint_shot_timer_late
        },
        minion_spawn_timer: if boss.enraged {
            cfg.boss.enraged_checkpoint_minion_timer
        } else {
            cfg.boss.checkpoint_minion_timer
        },
        attack_cycle: boss.attack_cycle,
        mutated: boss.mutated,
        enraged: boss.enraged,
    }
}

fn snapshot_phase_start(boss: &mut Boss, cfg: &GameConfig) {
    boss.checkpoint = phase_checkpoint(boss, cfg);
}

/// Clear attack and effect runtime without touching phase progression.
fn reset_transient(state: &mut GameState) {
    if let Some(boss) = state.boss.as_mut() {
        boss.layer_break_fx_timer = 0.0;
        boss.flash_timer = 0.0;
        boss.shield_timer = 0.0;
        boss.counter_punish_timer = 0.0;
        boss.burst = Burst::default();
        boss.windup = None;
        boss.attack_lock_timer = 0.0;
        boss.particles.clear();
    }
    state.boss_minions.clear();
    state.bullets_enemy.clear();
}

fn begin_entrance(state: &mut GameState, cfg: &GameConfig, is_retry: bool) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let duration = if is_retry {
        cfg.boss.retry_entrance_duration
    } else {
        cfg.boss.entrance_duration
    };
    boss.phase = BossPhase::Entrance {
        timer: duration,
        duration,
    };
    boss.reveal_alpha = cfg.boss.entrance_reveal_alpha;
    boss.x = cfg.boss_start_x();
    boss.y = -cfg.boss.offscreen_y.abs().max(boss.h * 1.2);
    boss.shot_timer = cfg.boss.entrance_shot_timer;
    boss.windup = None;
    boss.attack_lock_timer = 0.0;
    boss.burst.shots = 0;
    boss.phase_banner_timer = 1.45;
    state.bullets_enemy.clear();
    state.boss_minions.clear();
}

pub fn spawn_boss(state: &mut GameState, cfg: &GameConfig) {
    let b = &cfg.boss;
    let mut boss = Boss {
        x: cfg.boss_start_x(),
        y: b.offscreen_y,
        w: b.base_w,
        h: b.base_h,
        scale: 1.0,
        speed: b.base_speed,
        dir: 1.0,
        layers: b.layer_hp.iter().map(|&hp| Layer::full(hp)).collect(),
        current_layer: 0,
        evolution_layer_index: b.evolution_layer_index,
        phase: BossPhase::Combat,
        mutated: false,
        enraged: false,
        mutation_progress: 0.0,
        shot_timer: b.initial_shot_timer,
        shield_timer: 0.0,
        counter_punish_timer: 0.0,
        attack_lock_timer: 0.0,
        windup: None,
        burst: Burst::default(),
        attack_cycle: 0,
        minion_spawn_timer: b.spawn_minion_timer,
        layer_break_fx_timer: 0.0,
        flash_timer: 0.0,
        phase_banner_timer: 1.2,
        shake_amount: 0.0,
        flicker_timer: 0.0,
        flicker_alpha: 0.0,
        reveal_alpha: b.initial_reveal_alpha,
        particles: Vec::new(),
        checkpoint: PhaseCheckpoint {
            layer_index: 0,
            layer_hp: 0.0,
            x: 0.0,
            y: 0.0,
            dir: 1.0,
            shot_timer: 0.0,
            minion_spawn_timer: 0.0,
            attack_cycle: 0,
            mutated: false,
            enraged: false,
        },
    };
    snapshot_phase_start(&mut boss, cfg);
    state.boss = Some(boss);
    state.boss_minions.clear();
    state.bullets_enemy.clear();
    state.emit(GameEvent::PlayBgm {
        track: BgmTrack::Boss,
        fade_ms: 140,
    });
    begin_entrance(state, cfg, false);
    info!(layers = cfg.boss.layer_hp.len(), "boss spawned");
}

/// Roll the boss back to the start of the phase it was in when the player
/// died. Layers below the checkpoint stay broken, the checkpoint layer is
/// refilled to its recorded hp, later layers are full.
fn restore_phase_start(state: &mut GameState, cfg: &GameConfig) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let snap = boss.checkpoint;
    boss.current_layer = snap.layer_index;
    for (i, layer) in boss.layers.iter_mut().enumerate() {
        layer.hp = match i.cmp(&snap.layer_index) {
            std::cmp::Ordering::Less => 0.0,
            std::cmp::Ordering::Equal => snap.layer_hp,
            std::cmp::Ordering::Greater => layer.max,
        };
    }
    boss.x = snap.x;
    boss.y = snap.y;
    boss.dir = snap.dir;
    boss.shot_timer = snap.shot_timer;
    boss.minion_spawn_timer = snap.minion_spawn_timer;
    boss.attack_cycle = snap.attack_cycle;
    boss.mutated = snap.mutated;
    boss.enraged = snap.enraged;
    boss.mutation_progress = if snap.mutated { 1.0 } else { 0.0 };
    let scale = if snap.mutated { cfg.boss.mutated_scale } else { 1.0 };
    apply_scale(boss, cfg, scale);
    boss.speed = cfg.boss.base_speed
        + if snap.mutated {
            cfg.boss.mutation_speed_bonus
        } else {
            0.0
        };
    boss.phase = BossPhase::Combat;
    boss.phase_banner_timer = 1.1;
    reset_transient(state);
}

/// Accepting the continue prompt: fresh player, boss back at its phase
/// checkpoint, then a (shorter) entrance. Without a live boss in
/// `Playing` mode this falls back to a loss.
pub fn respawn_at_checkpoint(state: &mut GameState, cfg: &GameConfig) {
    if state.boss.is_none() || state.mode != Mode::Playing {
        flow::trigger_loss(state, LossOptions::default());
        return;
    }
    let mut player = Player::new(cfg);
    player.x = cfg.boss_start_x();
    state.player = player;
    state.bullets_player.clear();
    state.bullets_enemy.clear();
    state.powerups.clear();
    restore_phase_start(state, cfg);
    begin_entrance(state, cfg, true);
    if let Some(boss) = state.boss.as_ref() {
        info!(
            layer = boss.current_layer,
            mutated = boss.mutated,
            enraged = boss.enraged,
            "respawned at boss checkpoint"
        );
    }
}

pub fn trigger_defeat(state: &mut GameState, rng: &mut impl Rng) {
    state.mode = Mode::Reveal;
    state.reveal_timer = 0.0;
    state.transition_alpha = 0.0;
    state.boss_defeat_fx = state.boss.take().map(|boss| {
        let particles = (0..DEFEAT_PARTICLES)
            .map(|_| Particle {
                x: boss.x + jitter(rng) * boss.w * 0.42,
                y: boss.y + jitter(rng) * boss.h * 0.36,
                vx: jitter(rng) * 260.0,
                vy: -90.0 - rng.gen::<f32>() * 250.0,
                life: 0.9 + rng.gen::<f32>() * 0.5,
                size: 3.0 + rng.gen::<f32>() * 4.0,
            })
            .collect();
        BossDefeatFx {
            x: boss.x,
            y: boss.y,
            w: boss.w,
            h: boss.h,
            timer: 0.0,
            duration: DEFEAT_FX_SECONDS,
            completed: false,
            particles,
        }
    });
    state.bullets_enemy.clear();
    state.bullets_player.clear();
    state.powerups.clear();
    state.boss_minions.clear();
    state.emit(GameEvent::PlayBgm {
        track: BgmTrack::End,
        fade_ms: 220,
    });
    state.emit(GameEvent::Sfx(SfxCue::BossDefeat));
    info!(score = state.score, "boss defeated");
}

fn begin_evolution(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, next_layer: usize) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let duration = cfg.boss.evolution_duration;
    boss.phase = BossPhase::Evolving {
        timer: duration,
        duration,
        next_layer,
    };
    boss.mutation_progress = 0.0;
    boss.flicker_timer = 0.0;
    boss.flicker_alpha = 0.0;
    boss.shake_amount = 0.0;
    spawn_break_particles(boss, rng, 42);
    state.bullets_enemy.clear();
    state.boss_minions.clear();
    info!(next_layer, "boss evolution started");
}

fn complete_evolution(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, next_layer: usize) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.mutated = true;
    boss.mutation_progress = 1.0;
    boss.current_layer = next_layer;
    apply_scale(boss, cfg, cfg.boss.mutated_scale);
    boss.speed += cfg.boss.mutation_speed_bonus;
    boss.phase_banner_timer = 1.3;
    boss.shot_timer = 0.2;
    fire_lances(boss, &mut state.bullets_enemy, 320.0, 1);
    spawn_break_particles(boss, rng, 34);
    if boss.is_final_layer() {
        boss.enraged = true;
    }
    boss.phase = BossPhase::Combat;
    snapshot_phase_start(boss, cfg);
    info!(layer = boss.current_layer, enraged = boss.enraged, "boss evolution complete");
}

fn handle_layer_break(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.layer_break_fx_timer = LAYER_BREAK_FX;
    boss.flash_timer = LAYER_BREAK_FLASH;
    boss.phase_banner_timer = 1.2;
    boss.windup = None;
    boss.burst = Burst::default();
    spawn_break_particles(boss, rng, 32);
    let (bx, by) = (boss.x, boss.y);
    let broken = boss.current_layer;
    let is_final = boss.is_final_layer();
    let evolves = broken + 1 == boss.evolution_layer_index && !boss.mutated;

    let hint = state.wave + 3;
    maybe_drop_powerup(state, cfg, rng, bx - 26.0, by + 18.0, hint);
    maybe_drop_powerup(state, cfg, rng, bx + 26.0, by + 18.0, hint);
    state.score += cfg.boss.layer_break_score;
    info!(layer = broken, score = state.score, "boss layer broken");

    if is_final {
        trigger_defeat(state, rng);
        return;
    }

    let next_layer = broken + 1;
    if evolves {
        begin_evolution(state, cfg, rng, next_layer);
    } else if let Some(boss) = state.boss.as_mut() {
        boss.phase = BossPhase::Transition {
            timer: cfg.boss.transition_duration,
            next_layer,
        };
    }
}

/// Apply player damage to the active layer. Returns whether it registered.
///
/// Entrance, transition and evolution ignore hits. A raised shield also
/// ignores them and answers with a single aimed shot, rate-limited by the
/// counter-punish guard.
pub fn damage_boss(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, raw: f32) -> bool {
    let Some(boss) = state.boss.as_mut() else {
        return false;
    };
    if boss.is_invulnerable() {
        return false;
    }
    if boss.shield_timer > 0.0 {
        if boss.counter_punish_timer <= 0.0 {
            let speed = 360.0 + if boss.enraged { 90.0 } else { 0.0 };
            let damage = boss.shot_damage(cfg.boss.enraged_shot_damage);
            fire_aimed(boss, &mut state.bullets_enemy, &state.player, speed, damage);
            boss.counter_punish_timer = cfg.boss.counter_punish_cooldown;
        }
        return false;
    }

    let multiplier = if boss.enraged {
        cfg.boss.enrage_damage_taken_multiplier
    } else {
        1.0
    };
    let idx = boss.current_layer;
    let layer = &mut boss.layers[idx];
    layer.hp = (layer.hp - raw * multiplier).max(0.0);
    let broken = layer.is_broken();
    boss.flash_timer = cfg.boss.hit_flash;

    if broken {
        handle_layer_break(state, cfg, rng);
    }
    true
}

// ── Per-frame update ──────────────────────────────────────────────────────────

pub fn update_boss(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, dt: f32) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    for p in &mut boss.particles {
        p.life -= dt;
        p.x += p.vx * dt;
        p.y += p.vy * dt;
        p.vx *= 0.97;
        p.vy *= 0.97;
    }
    boss.particles.retain(|p| p.life > 0.0);

    boss.layer_break_fx_timer = (boss.layer_break_fx_timer - dt).max(0.0);
    boss.flash_timer = (boss.flash_timer - dt).max(0.0);
    boss.shield_timer = (boss.shield_timer - dt).max(0.0);
    boss.counter_punish_timer = (boss.counter_punish_timer - dt).max(0.0);
    boss.phase_banner_timer = (boss.phase_banner_timer - dt).max(0.0);
    boss.attack_lock_timer = (boss.attack_lock_timer - dt).max(0.0);

    let phase = boss.phase;
    match phase {
        BossPhase::Entrance { timer, duration } => {
            update_entrance(state, cfg, rng, dt, timer, duration)
        }
        BossPhase::Grace { timer } => update_grace(state, cfg, rng, dt, timer),
        BossPhase::Evolving {
            timer,
            duration,
            next_layer,
        } => update_evolution(state, cfg, rng, dt, timer, duration, next_layer),
        BossPhase::Transition { timer, next_layer } => {
            update_transition(state, cfg, rng, dt, timer, next_layer)
        }
        BossPhase::Combat => update_combat(state, cfg, rng, dt),
    }
}

fn update_entrance(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    dt: f32,
    timer: f32,
    duration: f32,
) {
    let loop_time = state.loop_time;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let timer = (timer - dt).max(0.0);
    let progress = 1.0 - timer / duration.max(0.001);
    let eased = 1.0 - (1.0 - progress).powi(3);
    let start_y = -cfg.boss.offscreen_y.abs().max(boss.h * 1.2);
    boss.y = start_y + (cfg.boss.entrance_target_y - start_y) * eased;
    boss.x = cfg.boss_start_x() + (loop_time * 1.5).sin() * 8.0 * (1.0 - progress);
    boss.shake_amount = 0.45 + (1.0 - progress) * 0.55;
    let alpha_floor = cfg.boss.entrance_reveal_alpha;
    boss.reveal_alpha = clamp(alpha_floor + progress * (1.0 - alpha_floor), alpha_floor, 1.0);

    let done = timer <= 0.0;
    if done {
        boss.phase = BossPhase::Grace {
            timer: cfg.boss.grace_duration,
        };
        boss.shake_amount = 0.35;
    } else {
        boss.phase = BossPhase::Entrance { timer, duration };
    }

    update_minions(state, cfg, rng, dt, true);
    if done {
        state.bullets_enemy.clear();
        debug!("boss entrance finished");
    }
}

fn update_grace(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, dt: f32, timer: f32) {
    let loop_time = state.loop_time;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let timer = (timer - dt).max(0.0);
    boss.shake_amount = 0.15 + (loop_time * 8.0).sin() * 0.08;
    if timer <= 0.0 {
        boss.phase = BossPhase::Combat;
        boss.shot_timer = boss.shot_timer.max(0.75);
        boss.shake_amount = 0.0;
        debug!("boss grace finished");
    } else {
        boss.phase = BossPhase::Grace { timer };
    }
    update_minions(state, cfg, rng, dt, true);
}

fn update_evolution(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    dt: f32,
    timer: f32,
    duration: f32,
    next_layer: usize,
) {
    let loop_time = state.loop_time;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let timer = (timer - dt).max(0.0);
    boss.mutation_progress = 1.0 - timer / duration.max(0.001);
    boss.shake_amount = 2.0 + boss.mutation_progress * 4.0;
    boss.flicker_timer -= dt;
    if boss.flicker_timer <= 0.0 {
        boss.flicker_timer = 0.05 + rng.gen::<f32>() * 0.22;
        boss.flicker_alpha = 0.1 + rng.gen::<f32>() * 0.22;
    }
    boss.x += (loop_time * 7.0).sin() * 18.0 * dt;
    boss.x = clamp(boss.x, boss.w * 0.55, cfg.width - boss.w * 0.55);
    boss.phase = BossPhase::Evolving {
        timer,
        duration,
        next_layer,
    };

    update_minions(state, cfg, rng, dt, true);
    if timer <= 0.0 {
        complete_evolution(state, cfg, rng, next_layer);
    }
}

fn update_transition(
    state: &mut GameState,
    cfg: &GameConfig,
    rng: &mut impl Rng,
    dt: f32,
    timer: f32,
    next_layer: usize,
) {
    let timer = (timer - dt).max(0.0);
    if let Some(boss) = state.boss.as_mut() {
        boss.phase = BossPhase::Transition { timer, next_layer };
    }
    update_minions(state, cfg, rng, dt, true);
    if timer > 0.0 {
        return;
    }

    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.current_layer = next_layer;
    if boss.is_final_layer() {
        boss.enraged = true;
        boss.phase_banner_timer = 1.4;
        boss.shake_amount = 1.5;
        info!(layer = next_layer, "boss enraged");
    }
    boss.shot_timer = (cfg.boss.phase_start_shot_timer
        - boss.current_layer as f32 * cfg.boss.phase_start_shot_timer_step)
        .max(0.0);
    boss.phase = BossPhase::Combat;
    snapshot_phase_start(boss, cfg);
    info!(layer = next_layer, "boss phase started");
}

fn update_combat(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, dt: f32) {
    let loop_time = state.loop_time;
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let phase = boss.current_layer;

    let mut move_speed = cfg.boss.phase_speed(phase);
    if boss.mutated {
        move_speed += cfg.boss.mutated_move_bonus;
    }
    if boss.enraged {
        move_speed += cfg.boss.enraged_move_bonus;
        boss.shake_amount = 1.1 + (loop_time * 8.0).sin() * 0.35;
    } else {
        boss.shake_amount = 0.0;
    }

    boss.x += boss.dir * move_speed * dt;
    boss.y = if boss.mutated {
        let rate = if boss.enraged { 4.5 } else { 2.8 };
        cfg.boss.start_y + (loop_time * rate).sin() * 12.0
    } else {
        cfg.boss.start_y
    };
    let margin = cfg.boss.edge_margin;
    if boss.x - boss.w / 2.0 <= margin && boss.dir < 0.0 {
        boss.dir = 1.0;
    } else if boss.x + boss.w / 2.0 >= cfg.width - margin && boss.dir > 0.0 {
        boss.dir = -1.0;
    }

    run_attack_cycle(state, cfg, rng, dt, phase);

    if phase >= 2 {
        let Some(boss) = state.boss.as_mut() else {
            return;
        };
        let cap = if boss.enraged { 2 } else { 1 };
        boss.minion_spawn_timer = (boss.minion_spawn_timer - dt).max(0.0);
        if boss.minion_spawn_timer <= 0.0 && state.boss_minions.len() < cap {
            boss.minion_spawn_timer = if boss.enraged {
                cfg.boss.enraged_minion_spawn_interval
            } else {
                cfg.boss.minion_spawn_interval
            };
            spawn_minion(state, cfg, rng);
        }
    }
    update_minions(state, cfg, rng, dt, false);

    if let Some(boss) = state.boss.as_mut() {
        if boss.mutated && rng.gen::<f32>() < dt * 10.0 {
            let particle = Particle {
                x: boss.x + jitter(rng) * boss.w * 0.6,
                y: boss.y + jitter(rng) * boss.h * 0.6,
                vx: jitter(rng) * 38.0,
                vy: -20.0 - rng.gen::<f32>() * 46.0,
                life: 0.35 + rng.gen::<f32>() * 0.35,
                size: 2.0 + rng.gen::<f32>() * 2.0,
            };
            boss.particles.push(particle);
        }
    }
}

/// Burst follow-ups, then windup, then the attack lock, then choosing
/// the next attack. Only one of these advances per frame.
fn run_attack_cycle(state: &mut GameState, cfg: &GameConfig, rng: &mut impl Rng, dt: f32, phase: usize) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let damage = boss.shot_damage(cfg.boss.enraged_shot_damage);

    boss.burst.timer = (boss.burst.timer - dt).max(0.0);
    if boss.burst.shots > 0 && boss.burst.timer <= 0.0 {
        let enraged = boss.enraged;
        let (count, arc, speed) = if enraged { (6, 0.56, 320.0) } else { (5, 0.42, 285.0) };
        fire_spread(boss, &mut state.bullets_enemy, count, arc, speed, damage);
        boss.burst.shots -= 1;
        boss.burst.timer = boss.burst.interval + if enraged { 0.03 } else { 0.05 };
        boss.attack_lock_timer = boss.attack_lock_timer.max(0.08);
        if boss.burst.shots == 0 && phase >= 2 {
            boss.shield_timer = if enraged { 0.42 } else { 0.3 };
            boss.shot_timer = boss.shot_timer.max(if enraged { 0.46 } else { 0.56 });
        }
        maybe_drop_combat_powerup(state, cfg, rng, if enraged { 0.025 } else { 0.016 });
        return;
    }

    if let Some(mut windup) = boss.windup {
        windup.timer = (windup.timer - dt).max(0.0);
        if windup.timer > 0.0 {
            boss.windup = Some(windup);
            return;
        }
        boss.windup = None;
        execute_attack(state, cfg, windup.attack);
        let chance = if phase >= 2 { 0.055 } else { 0.034 };
        maybe_drop_combat_powerup(state, cfg, rng, chance);
        return;
    }

    if boss.attack_lock_timer > 0.0 {
        return;
    }

    boss.shot_timer = (boss.shot_timer - dt).max(0.0);
    if boss.shot_timer <= 0.0 {
        boss.attack_cycle += 1;
        let pattern = AttackPattern::for_phase(phase);
        let duration = windup_duration(pattern);
        boss.windup = Some(Windup {
            attack: PendingAttack {
                pattern,
                cycle: boss.attack_cycle,
                damage,
            },
            timer: duration,
            duration,
        });
        debug!(pattern = pattern.as_str(), cycle = boss.attack_cycle, "boss windup");
    }
}

/// Fire a committed attack once its windup has elapsed.
fn execute_attack(state: &mut GameState, cfg: &GameConfig, attack: PendingAttack) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let bullets = &mut state.bullets_enemy;
    let player = &state.player;
    let damage = attack.damage;
    let even = attack.cycle % 2 == 0;

    let (shot_timer, lock) = match attack.pattern {
        AttackPattern::Spread => {
            fire_spread(boss, bullets, 3, 0.2, 235.0, damage);
            (0.9, 0.12)
        }
        AttackPattern::Mixed => {
            fire_spread(boss, bullets, 4, 0.34, 270.0, damage);
            if attack.cycle % 4 == 0 {
                fire_aimed(boss, bullets, player, 315.0, damage);
            }
            (0.82, 0.16)
        }
        AttackPattern::Mutant => {
            if even {
                fire_lances(boss, bullets, 295.0, damage);
                fire_spread(boss, bullets, 5, 0.45, 300.0, damage);
                boss.shield_timer = 0.28;
            } else {
                fire_constrictor(boss, bullets, cfg.width, 2, 255.0, damage);
                boss.burst = Burst {
                    shots: 2,
                    interval: 0.16,
                    timer: 0.05,
                };
            }
            (0.92, 0.22)
        }
        AttackPattern::Enraged => {
            if even {
                fire_lances(boss, bullets, 330.0, damage);
                fire_spread(boss, bullets, 6, 0.52, 325.0, damage);
                boss.shield_timer = 0.36;
            } else {
                fire_aimed(boss, bullets, player, 355.0, damage);
                boss.burst = Burst {
                    shots: 2,
                    interval: 0.14,
                    timer: 0.05,
                };
            }
            (0.76, 0.28)
        }
    };
    boss.shot_timer = shot_timer;
    boss.attack_lock_timer = lock;
}
