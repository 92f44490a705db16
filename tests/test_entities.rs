use starfall::boss::spawn_boss;
use starfall::config::GameConfig;
use starfall::entities::*;
use starfall::events::{GameEvent, SfxCue};

#[test]
fn enum_wire_names() {
    assert_eq!(Mode::Start.as_str(), "start");
    assert_eq!(Mode::ContinuePrompt.as_str(), "continue_prompt");
    assert_eq!(Mode::End.as_str(), "end");
    assert_eq!(EndReason::Win.as_str(), "win");
    assert_eq!(EndReason::Lose.as_str(), "lose");
    assert_eq!(PowerupKind::SpreadShot.as_str(), "spread_shot");
    assert_eq!(AttackPattern::Mutant.as_str(), "mutant");
}

#[test]
fn attack_pattern_follows_the_phase() {
    assert_eq!(AttackPattern::for_phase(0), AttackPattern::Spread);
    assert_eq!(AttackPattern::for_phase(1), AttackPattern::Mixed);
    assert_eq!(AttackPattern::for_phase(2), AttackPattern::Mutant);
    assert_eq!(AttackPattern::for_phase(3), AttackPattern::Enraged);
    assert_eq!(AttackPattern::for_phase(7), AttackPattern::Enraged);
}

#[test]
fn enemy_variant_per_wave() {
    assert_eq!(EnemyVariant::for_wave(1), EnemyVariant::Scout);
    assert_eq!(EnemyVariant::for_wave(3), EnemyVariant::Striker);
    assert_eq!(EnemyVariant::for_wave(9), EnemyVariant::Warden);
}

#[test]
fn powerup_kinds_are_all_listed() {
    assert_eq!(PowerupKind::ALL.len(), 3);
    assert!(PowerupKind::ALL.contains(&PowerupKind::Shield));
}

#[test]
fn player_starts_centred_above_the_bottom() {
    let cfg = GameConfig::default();
    let player = Player::new(&cfg);
    assert_eq!(player.x, 480.0);
    assert_eq!(player.y, 720.0 - 56.0);
    assert_eq!(player.lives, 3);
    assert_eq!(player.rapid, TimedPower::default());
}

#[test]
fn layer_breaks_at_zero() {
    let mut layer = Layer::full(120.0);
    assert!(!layer.is_broken());
    layer.hp = 0.0;
    assert!(layer.is_broken());
}

#[test]
fn boss_phase_queries() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    spawn_boss(&mut state, &cfg);
    let boss = state.boss.as_mut().unwrap();

    assert!(boss.entrance_active());
    assert!(boss.is_invulnerable());
    assert_eq!(boss.next_layer(), None);

    boss.phase = BossPhase::Grace { timer: 1.0 };
    assert!(boss.grace_active());
    assert!(!boss.is_invulnerable());

    boss.phase = BossPhase::Transition {
        timer: 1.0,
        next_layer: 1,
    };
    assert!(boss.in_transition());
    assert!(boss.is_invulnerable());
    assert_eq!(boss.next_layer(), Some(1));

    boss.phase = BossPhase::Evolving {
        timer: 0.0,
        duration: 2.8,
        next_layer: 2,
    };
    assert!(boss.is_evolving());
    assert_eq!(boss.next_layer(), Some(2));

    boss.current_layer = 3;
    assert!(boss.is_final_layer());
    assert_eq!(boss.shot_damage(2), 1);
    boss.enraged = true;
    assert_eq!(boss.shot_damage(2), 2);
}

#[test]
fn reset_keeps_input_and_queued_events() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    state.score = 900;
    state.wave = 3;
    state.input.left = true;
    state.emit(GameEvent::Sfx(SfxCue::UiClick));

    state.reset(&cfg, Mode::Playing);

    assert_eq!(state.mode, Mode::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(state.wave, 1);
    assert!(state.input.left);
    assert_eq!(state.events, vec![GameEvent::Sfx(SfxCue::UiClick)]);
}

#[test]
fn game_state_clone_is_independent() {
    let cfg = GameConfig::default();
    let original = GameState::new(&cfg);
    let mut cloned = original.clone();

    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.powerups.push(Powerup {
        x: 5.0,
        y: 5.0,
        w: 24.0,
        h: 24.0,
        vy: 82.0,
        kind: PowerupKind::RapidFire,
    });

    assert_eq!(original.player.x, 480.0);
    assert_eq!(original.score, 0);
    assert!(original.powerups.is_empty());
}
