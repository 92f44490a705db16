use starfall::audio::AudioStatus;
use starfall::config::GameConfig;
use starfall::entities::{InputState, Mode};
use starfall::events::{BgmTrack, GameEvent};
use starfall::flow::LossOptions;
use starfall::sim::Game;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn game() -> Game {
    Game::with_seed(GameConfig::default(), 7)
}

#[test]
fn new_game_waits_on_the_start_screen() {
    let mut g = game();
    assert_eq!(g.state.mode, Mode::Start);
    assert_eq!(g.stars.len(), 130);

    g.tick(0.5);

    assert_eq!(g.state.mode, Mode::Start);
    assert!(g.state.enemies.is_empty());
}

#[test]
fn tick_clamps_long_frames() {
    let mut g = game();
    g.tick(1.0);
    assert_relative_eq!(g.state.loop_time, 0.033);
    g.tick(-1.0);
    assert_relative_eq!(g.state.loop_time, 0.033);
}

#[test]
fn advance_time_steps_at_sixty_hertz() {
    let mut g = game();
    g.start_game();

    g.advance_time(1000.0);

    assert!(g.is_deterministic());
    assert_relative_eq!(g.state.loop_time, 1.0, epsilon = 1e-3);
}

#[test]
fn advance_time_always_takes_at_least_one_step() {
    let mut g = game();
    g.advance_time(1.0);
    assert_relative_eq!(g.state.loop_time, 1.0 / 60.0);
}

#[test]
fn real_time_frames_are_ignored_in_deterministic_mode() {
    let mut g = game();
    g.frame(0.02);
    assert_relative_eq!(g.state.loop_time, 0.02);

    g.advance_time(100.0);
    let before = g.state.loop_time;
    g.frame(0.02);
    assert_eq!(g.state.loop_time, before);
}

#[test]
fn same_seed_same_run() {
    let run = || {
        let mut g = game();
        g.start_game();
        g.set_input(InputState {
            shoot: true,
            right: true,
            ..InputState::default()
        });
        g.advance_time(5000.0);
        g.snapshot(AudioStatus::default())
    };
    assert_eq!(run(), run());
}

#[test]
fn any_rng_can_drive_the_game() {
    let mut g = Game::new(GameConfig::default(), StdRng::seed_from_u64(1));
    g.start_game();
    g.advance_time(500.0);
    assert_eq!(g.state.mode, Mode::Playing);
}

#[test]
fn held_fire_reaches_the_simulation() {
    let mut g = game();
    g.start_game();
    g.set_input(InputState {
        shoot: true,
        ..InputState::default()
    });
    g.advance_time(20.0);
    assert!(!g.state.bullets_player.is_empty());
}

#[test]
fn drain_events_empties_the_queue() {
    let mut g = game();
    g.start_game();

    let events = g.drain_events();

    assert!(events.contains(&GameEvent::PlayBgm {
        track: BgmTrack::Wave,
        fade_ms: 280
    }));
    assert!(g.drain_events().is_empty());
}

#[test]
fn ui_entry_points_route_to_flow() {
    let mut g = game();
    g.start_game();
    g.show_continue_prompt(LossOptions::default());
    // no boss yet, so this is a plain loss
    assert_eq!(g.state.mode, Mode::End);

    g.restart();
    assert_eq!(g.state.mode, Mode::Start);

    g.start_game();
    g.trigger_loss(LossOptions { play_game_over: true });
    assert_eq!(g.state.mode, Mode::End);

    g.choose_continue_yes();
    assert_eq!(g.state.mode, Mode::End);
}
