mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use starfall::audio::{BgmController, SilentBackend};
use starfall::config::GameConfig;
use starfall::entities::{InputState, Mode};
use starfall::events::{BgmTrack, GameEvent, SfxCue};
use starfall::sim::Game;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈130 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "starfall", version, about = "Wave shooter with a layered boss fight")]
struct Args {
    /// Seed for the gameplay RNG (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding any subset of the tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run without a terminal: start a game, advance this many
    /// milliseconds in fixed steps, print the state snapshot and exit
    #[arg(long, value_name = "MS")]
    headless_ms: Option<f32>,

    /// Hold fire for the whole headless run
    #[arg(long, requires = "headless_ms")]
    hold_fire: bool,

    /// Write logs here while the terminal UI is up
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame));
    InputState {
        left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        shoot: any(&[KeyCode::Char(' ')]),
    }
}

fn init_logging(args: &Args) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.headless_ms.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn load_config(args: &Args) -> io::Result<GameConfig> {
    match &args.config {
        Some(path) => GameConfig::load(path)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
        None => Ok(GameConfig::default()),
    }
}

fn make_game(cfg: GameConfig, seed: Option<u64>) -> Game {
    match seed {
        Some(seed) => Game::with_seed(cfg, seed),
        None => Game::from_entropy(cfg),
    }
}

fn pump_audio(game: &mut Game, audio: &mut BgmController<SilentBackend>, dt: f32) {
    for event in game.drain_events() {
        audio.apply(event);
    }
    audio.update(dt);
}

// ── Headless runner ───────────────────────────────────────────────────────────

fn run_headless(game: &mut Game, ms: f32, hold_fire: bool) -> io::Result<()> {
    let mut audio = BgmController::new(SilentBackend);
    game.start_game();
    game.set_input(InputState {
        shoot: hold_fire,
        ..InputState::default()
    });
    game.advance_time(ms);
    pump_audio(game, &mut audio, ms / 1000.0);

    let snapshot = game.snapshot(audio.status());
    let json = snapshot
        .to_json_pretty()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    let mut out = stdout().lock();
    writeln!(out, "{json}")?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame the keys that are still "fresh" become the
/// held-input flags the simulation polls, so Space + A/D work together.
///
/// One-shot keys (start, continue Y/N, restart, quit) act on press.
fn game_loop<W: Write>(out: &mut W, game: &mut Game, rx: &mpsc::Receiver<Event>) -> io::Result<()> {
    let mut audio = BgmController::new(SilentBackend);
    audio.play(BgmTrack::Start, 0);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    let quit = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
                        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
                    if quit {
                        info!("quit requested");
                        return Ok(());
                    }
                    handle_action_key(game, code);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = if game.state.mode == Mode::Playing {
            held_input(&key_frame, frame)
        } else {
            InputState::default()
        };
        game.set_input(input);

        let now = Instant::now();
        let real_dt = now.duration_since(last).as_secs_f32();
        last = now;
        game.frame(real_dt);
        pump_audio(game, &mut audio, real_dt);

        display::render(out, &game.state, &game.stars, &game.cfg)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn handle_action_key(game: &mut Game, code: KeyCode) {
    match (game.state.mode, code) {
        (Mode::Start, KeyCode::Enter | KeyCode::Char(' ')) => {
            game.state.emit(GameEvent::Sfx(SfxCue::UiClick));
            game.start_game();
        }
        (Mode::ContinuePrompt, KeyCode::Char('y') | KeyCode::Char('Y')) => game.choose_continue_yes(),
        (Mode::ContinuePrompt, KeyCode::Char('n') | KeyCode::Char('N')) => game.choose_continue_no(),
        (Mode::End, KeyCode::Char('r') | KeyCode::Char('R')) => game.restart(),
        _ => {}
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    let cfg = load_config(&args)?;
    let mut game = make_game(cfg, args.seed);

    if let Some(ms) = args.headless_ms {
        return run_headless(&mut game, ms, args.hold_fire);
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
