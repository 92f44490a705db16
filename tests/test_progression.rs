use starfall::boss::spawn_boss;
use starfall::config::GameConfig;
use starfall::entities::*;
use starfall::progression::update_playing;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn playing_state(cfg: &GameConfig) -> GameState {
    let mut state = GameState::new(cfg);
    state.mode = Mode::Playing;
    state
}

#[test]
fn cleared_wave_spawns_the_next_one() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);

    update_playing(&mut state, &cfg, &mut seeded_rng(), DT);

    assert_eq!(state.wave, 2);
    assert_eq!(state.enemies.len(), 4 * 9);
    assert!(state.boss.is_none());
}

#[test]
fn clearing_the_last_wave_spawns_the_boss() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.wave = cfg.total_waves;

    update_playing(&mut state, &cfg, &mut seeded_rng(), DT);

    assert_eq!(state.wave, cfg.total_waves);
    let boss = state.boss.as_ref().expect("boss should spawn");
    assert!(boss.entrance_active());
    assert!(state.enemies.is_empty());
}

#[test]
fn no_spawn_once_the_frame_ended_play() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    state.player.lives = 1;
    let (px, py) = (state.player.x, state.player.y);
    state.bullets_enemy.push(Projectile {
        x: px,
        y: py,
        w: 6.0,
        h: 16.0,
        vx: 0.0,
        vy: 0.0,
        damage: 1,
        source: ShotSource::EnemyWave,
    });

    update_playing(&mut state, &cfg, &mut seeded_rng(), DT);

    assert_eq!(state.mode, Mode::End);
    assert_eq!(state.wave, 1);
    assert!(state.enemies.is_empty());
}

#[test]
fn wave_drop_cooldown_ticks_only_without_a_boss() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();

    let mut waves = playing_state(&cfg);
    waves.enemies.push(Enemy {
        x: 480.0,
        y: 200.0,
        w: 34.0,
        h: 24.0,
        alive: true,
        variant: EnemyVariant::Scout,
        anim_phase: 0.0,
        shot_bias: 1.0,
    });
    waves.wave_drop_cooldown = 0.3;
    update_playing(&mut waves, &cfg, &mut rng, 0.03);
    assert_relative_eq!(waves.wave_drop_cooldown, 0.27, epsilon = 1e-5);

    let mut boss = playing_state(&cfg);
    spawn_boss(&mut boss, &cfg);
    boss.wave_drop_cooldown = 0.3;
    update_playing(&mut boss, &cfg, &mut rng, 0.03);
    assert_relative_eq!(boss.wave_drop_cooldown, 0.3);
}

#[test]
fn boss_fight_does_not_spawn_waves() {
    let cfg = GameConfig::default();
    let mut state = playing_state(&cfg);
    spawn_boss(&mut state, &cfg);

    for _ in 0..30 {
        update_playing(&mut state, &cfg, &mut seeded_rng(), DT);
    }

    assert!(state.enemies.is_empty());
    assert_eq!(state.wave, 1);
}
