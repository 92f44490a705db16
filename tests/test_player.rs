use starfall::boss::spawn_boss;
use starfall::config::GameConfig;
use starfall::entities::*;
use starfall::events::{BgmTrack, GameEvent, SfxCue};
use starfall::player::*;

use approx::assert_relative_eq;

fn playing_state(cfg: &GameConfig) -> GameState {
    let mut state = GameState::new(cfg);
    state.mode = Mode::Playing;
    state
}

// ── consume_player_hit ────────────────────────────────────────────────────────

#[test]
fn shield_absorbs_before_lives() {
    let cfg = GameConfig::default();
    for shield in 0..4u32 {
        for damage in 0..5u32 {
            let mut state = playing_state(&cfg);
            state.player.lives = 10;
            state.player.shield_hits = shield;

            consume_player_hit(&mut state, &cfg, damage);

            let absorbed = shield.min(damage);
            assert_eq!(state.player.shield_hits, shield - absorbed, "s={shield} d={damage}");
            assert_eq!(state.player.lives, 10 - (damage - absorbed) as i32, "s={shield} d={damage}");
        }
    }
}

#[test]
fn fully_absorbed_hit_gives_no_feedback() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.shield_hits = 2;

    consume_player_hit(&mut state, &cfg, 1);

    assert_eq!(state.player.lives, 3);
    assert_eq!(state.hit_fx.shake_timer, 0.0);
}

#[test]
fn lives_never_go_negative() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.lives = 1;

    consume_player_hit(&mut state, &cfg, 5);

    assert_eq!(state.player.lives, 0);
}

#[test]
fn last_life_in_boss_fight_opens_continue_prompt() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    spawn_boss(&mut state, &cfg);
    state.player.lives = 1;
    state.player.shield_hits = 0;
    state.events.clear();

    consume_player_hit(&mut state, &cfg, 1);

    assert_eq!(state.player.lives, 0);
    assert_eq!(state.mode, Mode::ContinuePrompt);
    assert_relative_eq!(state.continue_timer, 10.0);
    assert!(state.boss.is_some());
    assert!(state.events.contains(&GameEvent::PlayBgm {
        track: BgmTrack::GameOver,
        fade_ms: 160
    }));
}

#[test]
fn last_life_in_waves_ends_the_run() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.lives = 1;

    consume_player_hit(&mut state, &cfg, 1);

    assert_eq!(state.mode, Mode::End);
    assert_eq!(state.end_reason, Some(EndReason::Lose));
}

#[test]
fn damage_feedback_respects_retrigger_cooldown() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);

    consume_player_hit(&mut state, &cfg, 1);
    assert_relative_eq!(state.hit_fx.shake_timer, 0.12);
    assert_relative_eq!(state.hit_fx.cooldown_timer, 0.11);

    state.hit_fx.shake_timer = 0.0;
    consume_player_hit(&mut state, &cfg, 1);
    assert_eq!(state.hit_fx.shake_timer, 0.0);
    assert_eq!(state.player.lives, 1);
}

// ── shooting ──────────────────────────────────────────────────────────────────

#[test]
fn plain_shot_fires_one_bullet_upward() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);

    shoot(&mut state, &cfg);

    assert_eq!(state.bullets_player.len(), 1);
    let b = &state.bullets_player[0];
    assert_eq!(b.source, ShotSource::Player);
    assert_relative_eq!(b.vy, -520.0);
    assert_relative_eq!(state.player.shot_cooldown, 0.28);
    assert!(state.events.contains(&GameEvent::Sfx(SfxCue::Shoot)));
}

#[test]
fn shot_cooldown_blocks_refire() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    shoot(&mut state, &cfg);
    shoot(&mut state, &cfg);
    assert_eq!(state.bullets_player.len(), 1);
}

#[test]
fn spread_and_rapid_levels_shape_the_volley() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.spread = TimedPower {
        active: true,
        duration: 5.0,
        level: 2,
    };
    state.player.rapid = TimedPower {
        active: true,
        duration: 5.0,
        level: 1,
    };

    shoot(&mut state, &cfg);

    assert_eq!(state.bullets_player.len(), 5);
    assert_relative_eq!(state.player.shot_cooldown, 0.28 / 1.7);
}

// ── update_player ─────────────────────────────────────────────────────────────

#[test]
fn movement_is_clamped_to_the_screen() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.x = 10.0;
    state.input.left = true;

    update_player(&mut state, &cfg, 0.1);

    assert_relative_eq!(state.player.x, cfg.player.w * 0.6);
    assert_relative_eq!(state.player.vx, -340.0);
}

#[test]
fn held_fire_shoots_during_update() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.input.shoot = true;

    update_player(&mut state, &cfg, 1.0 / 60.0);

    assert_eq!(state.bullets_player.len(), 1);
}

#[test]
fn expired_power_resets_level() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.rapid = TimedPower {
        active: true,
        duration: 0.05,
        level: 2,
    };

    update_player(&mut state, &cfg, 0.1);

    assert!(!state.player.rapid.active);
    assert_eq!(state.player.rapid.level, 0);
    assert_eq!(state.player.rapid.duration, 0.0);
}
