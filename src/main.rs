mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use rocket_shooter::clock::{FrameClock, SimClock};
use rocket_shooter::compute::{init_state, reset, tick};
use rocket_shooter::constants::timing::TICK_RATE;
use rocket_shooter::entities::{GameEvent, GameStatus, World};
use rocket_shooter::highscore::HighScoreStore;
use rocket_shooter::input::InputSnapshot;
use rocket_shooter::snapshot;
use rocket_shooter::{GameConfig, ShipKind};

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a key stays held after its last press or repeat.  Terminals without
/// release reporting only send repeats, at 15 Hz or faster, so 8 frames at
/// 60 Hz bridges the gap.
const HOLD_WINDOW: u64 = 8;

/// Maps each held key → the frame it was last seen (press or repeat).
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
    confirm_was_held: bool,
}

impl HeldKeys {
    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.is_held(k, frame))
    }

    fn snapshot(&mut self, frame: u64) -> InputSnapshot {
        let confirm = self.any_held(&[KeyCode::Enter], frame);
        let confirm_released = self.confirm_was_held && !confirm;
        self.confirm_was_held = confirm;
        InputSnapshot {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            fire: self.is_held(KeyCode::Char(' '), frame),
            confirm_released,
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(ShipKind),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, high_score: u32) -> anyhow::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  ROCKET  SHOOTER  ★";
    out.queue(cursor::MoveTo(cx.saturating_sub(title.chars().count() as u16 / 2), cy.saturating_sub(6)))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if high_score > 0 {
        let hs_str = format!("Best Score: {}", high_score);
        out.queue(cursor::MoveTo(cx.saturating_sub(hs_str.chars().count() as u16 / 2), cy.saturating_sub(5)))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select your ship:"))?;

    let options: [(&str, ShipKind, Color, &str); 3] = [
        ("1", ShipKind::Default, Color::Green, "Balanced speed and fire rate"),
        ("2", ShipKind::Speed, Color::Yellow, "Fast hull, slower guns"),
        ("3", ShipKind::Heavy, Color::Red, "Slow hull, rapid guns"),
    ];
    for (i, (key, kind, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", kind.key())))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    let legend: [(&str, Color, &str); 4] = [
        ("◈", Color::Cyan, " Shield      — blocks all hits"),
        ("★", Color::Yellow, " Triple shot — 3-way fire"),
        ("╿", Color::Red, " Laser       — continuous beam"),
        ("»", Color::Green, " Speed boost — ×1.5 speed"),
    ];
    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 3))?;
    out.queue(Print("Power-ups:"))?;
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 4 + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Blocks until a ship is picked or the player quits
    loop {
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = rx.recv()? {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(ShipKind::Default)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(ShipKind::Speed)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(ShipKind::Heavy)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(MenuResult::Quit),
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs rounds back to back until the player quits.  The high score is
/// recorded at every game over.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: World,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    store: &HighScoreStore,
) -> anyhow::Result<()> {
    let mut keys = HeldKeys::default();
    let mut frame_clock = FrameClock::new(TICK_RATE);
    let mut sim_clock = SimClock::new(TICK_RATE);
    let mut recorded = false;

    loop {
        frame_clock.begin();
        let now = sim_clock.advance();
        let frame = sim_clock.ticks();

        // ── Input ─────────────────────────────────────────────────────────────
        let mut restart = false;
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else { continue };
            match kind {
                KeyEventKind::Press => {
                    keys.last_seen.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if state.status == GameStatus::GameOver => {
                            restart = true;
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    keys.last_seen.insert(code, frame);
                }
                KeyEventKind::Release => {
                    keys.last_seen.remove(&code);
                }
            }
        }

        let input = keys.snapshot(frame);
        if state.status == GameStatus::GameOver && (restart || input.confirm_released) {
            state = reset(&state, store.load(), now, rng)?;
            recorded = false;
        }

        state = tick(&state, &input, now, rng);
        for ev in &state.events {
            tracing::trace!(?ev, "audio cue");
        }

        if state.status == GameStatus::GameOver && !recorded {
            recorded = true;
            if let Err(e) = store.record(state.score) {
                tracing::warn!("Could not save high score: {}", e);
            }
        }
        if state.events.contains(&GameEvent::GameOver) {
            tracing::info!(score = state.score, "Round over");
        }

        display::render(out, &snapshot::frame(&state))?;
        frame_clock.finish();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let file = File::create(&config.log_path)
        .with_context(|| format!("creating log file {}", config.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = GameConfig::load_or_default();
    config.validate()?;
    init_logging(&config)?;
    tracing::info!("Rocket Shooter v{}", env!("CARGO_PKG_VERSION"));

    // Optional ship key on the command line skips the menu.
    let preselected = std::env::args().nth(1).map(|key| key.parse::<ShipKind>()).transpose()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events where the terminal supports them
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking reads on their own thread; the loop only ever try_recv()s
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config, preselected);

    // Restore the terminal even when the run failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("Exited with error: {:#}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    preselected: Option<ShipKind>,
) -> anyhow::Result<()> {
    let store = HighScoreStore::new(&config.high_score_path);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let ship = match preselected {
        Some(ship) => ship,
        None => match show_menu(out, rx, store.load())? {
            MenuResult::Start(ship) => ship,
            MenuResult::Quit => return Ok(()),
        },
    };
    tracing::info!(ship = ship.key(), "Round start");

    tracing::debug!(path = %store.path().display(), "High score store");
    let state = init_state(ship, config.clone(), store.load(), 0, &mut rng)?;
    game_loop(out, state, rx, &mut rng, &store)
}
