mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
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
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use life_invaders::compute::{handle_input, init_state, tick};
use life_invaders::config::Config;
use life_invaders::entities::{GameState, GameStatus, InputEvent};
use life_invaders::error::GameError;
use life_invaders::input::HeldKeys;
use life_invaders::starfield::Starfield;

// ── Command line ──────────────────────────────────────────────────────────────

/// Shoot down a Game-of-Life invasion before it reaches your ship.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// TOML file with game tunables (defaults to ./life_invaders.toml if present).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed the spawn RNG for a repeatable colony.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Start without the boss; play until the colony wins.
    #[arg(long)]
    no_boss: bool,
    /// Frame-rate cap.
    #[arg(long, value_name = "FPS", value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: Option<u32>,
}

const STAR_COUNT: usize = 40;

// ── Key mapping ───────────────────────────────────────────────────────────────

/// Map a one-shot key press onto a core event.
fn press_event(code: KeyCode, modifiers: KeyModifiers, status: GameStatus) -> Option<InputEvent> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::TogglePause),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(InputEvent::ToggleHelp),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Reset),
        KeyCode::Char('s') | KeyCode::Char('S') if status == GameStatus::Won => {
            Some(InputEvent::ResetWithoutBoss)
        }
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char(' ') => {
            Some(InputEvent::FirePrimary)
        }
        KeyCode::Char('x') | KeyCode::Char('X') => Some(InputEvent::FireSecondary),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Discrete actions (fire, pause, reset) fire once per key press. Movement
/// uses `HeldKeys`: it records when each key was last pressed or repeated,
/// and every frame the ship is steered by whichever direction is still
/// "fresh". Terminals with keyboard enhancement send releases and drop keys
/// immediately; classic terminals let them expire.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_len: Duration,
) -> std::io::Result<()> {
    let clock = Instant::now();
    let left_keys = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
    let right_keys = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

    let mut held: HeldKeys<KeyCode> = HeldKeys::default();
    // own stream so the seeded colony doesn't depend on the frame count
    let mut star_rng = StdRng::seed_from_u64(rng.gen());
    let mut stars = Starfield::new(
        state.grid.width(),
        state.grid.height(),
        STAR_COUNT,
        &mut star_rng,
    );

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    held.touch(code.clone(), frame_start);
                    match press_event(code, modifiers, state.status) {
                        Some(InputEvent::Quit) => return Ok(()),
                        Some(event) => *state = handle_input(state, event, now_ms),
                        None => {}
                    }
                }
                KeyEventKind::Repeat => {
                    held.touch(code, frame_start);
                }
                KeyEventKind::Release => {
                    held.release(&code);
                }
            }
        }

        // ── Steering from held keys ───────────────────────────────────────────
        let steer = match (
            held.any_held(&left_keys, frame_start),
            held.any_held(&right_keys, frame_start),
        ) {
            (true, _) => InputEvent::MoveLeft,
            (false, true) => InputEvent::MoveRight,
            (false, false) => InputEvent::StopMoving,
        };
        *state = handle_input(state, steer, now_ms);

        *state = tick(state, now_ms, rng);

        stars.update(state.status == GameStatus::Won, &mut star_rng);
        display::render(out, state, &stars)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config(args: &CliArgs) -> Result<Config, GameError> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), GameError> {
    env_logger::init();
    let args = CliArgs::parse();
    let config = load_config(&args)?;
    info!("starting on a {}x{} grid", config.grid_width, config.grid_height);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

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

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut state = init_state(&config, args.no_boss, 0);
    let frame_len = Duration::from_secs_f64(1.0 / config.fps as f64);
    let result = game_loop(&mut out, &mut state, &rx, &mut rng, frame_len);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("final score {}", state.score);
    result.map_err(GameError::from)
}
