mod display;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_shooter::compute::init_state;
use arcade_shooter::config::GameConfig;
use arcade_shooter::error::{GameError, GameResult};
use arcade_shooter::highscore::HighScoreStore;
use arcade_shooter::input::Command;
use arcade_shooter::session::{Flow, Session};

use display::{BellAudio, TerminalRenderer};

const LOG_ENV: &str = "ARCADE_SHOOTER_LOG";

// ── Held-key input ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 ticks (≈133 ms at
/// 60 Hz) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

const LEFT_KEYS: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: &[KeyCode] = &[
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
    KeyCode::Char(' '),
];

/// One-shot command for a freshly pressed key, if it maps to one.
fn press_command(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::ManualCleanup),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit command arrives.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the tick of the last press/repeat event for
/// every key.  Each tick we check which keys are still "fresh" (within
/// `HOLD_WINDOW` ticks) and turn them into level-triggered commands, so fire
/// and movement can be held together.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` ticks of
///   silence.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    session: &mut Session<BellAudio, StdRng>,
    rx: &mpsc::Receiver<Event>,
    tick_len: Duration,
) -> GameResult<()> {
    let clock = Instant::now();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut commands = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        commands.extend(press_command(code, modifiers));
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        // ── Held keys become this tick's level-triggered commands ─────────────
        if any_held(&key_frame, LEFT_KEYS, frame) {
            commands.push(Command::MoveLeft);
        }
        if any_held(&key_frame, RIGHT_KEYS, frame) {
            commands.push(Command::MoveRight);
        }
        if any_held(&key_frame, FIRE_KEYS, frame) {
            commands.push(Command::Fire);
        }

        let now_ms = clock.elapsed().as_millis() as u64;
        if session.step(&commands, now_ms) == Flow::Quit {
            return Ok(());
        }
        session.present(renderer, now_ms)?;

        let elapsed = frame_start.elapsed();
        if elapsed < tick_len {
            thread::sleep(tick_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Log to a file: stderr would draw over the alternate screen.
fn init_logging() {
    let path = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("arcade_shooter.log"));

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

fn main() -> GameResult<()> {
    init_logging();
    log::info!("arcade shooter starting");

    let config = GameConfig::load_or_default(&GameConfig::default_path());
    let store = HighScoreStore::new(config.high_score_path());
    let state = init_state(config.rules(), store.load());
    let mut session = Session::new(
        state,
        store,
        BellAudio::new(config.bell),
        StdRng::from_entropy(),
    );
    let tick_len = Duration::from_secs(1) / config.tick_rate;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().map_err(|e| GameError::io("enabling raw mode", e))?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = terminal::size()
        .map_err(|e| GameError::io("reading terminal size", e))
        .and_then(|(cols, rows)| {
            let mut renderer = TerminalRenderer::new(&mut out, cols, rows);
            game_loop(&mut renderer, &mut session, &rx, tick_len)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match &result {
        Ok(()) => log::info!("quit"),
        Err(e) => log::error!("{}", e),
    }
    result
}
