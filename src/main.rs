mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

use corporate_runner::compute::{advance, start_game, toggle_pause};
use corporate_runner::entities::{Difficulty, GameState, Theme};
use corporate_runner::input::InputTracker;
use corporate_runner::persistence::{FileHighScoreStore, HighScoreStore};
use corporate_runner::random::RngSource;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Parser)]
#[command(name = "corporate-runner")]
#[command(about = "Endless office runner: jump the meetings, duck the emails, beat the boss")]
struct Args {
    /// Difficulty preselected in the menu (easy, normal, expert)
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Theme preselected in the menu (day, night)
    #[arg(long, default_value = "day")]
    theme: String,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// High-score file (defaults to ~/.corporate_runner_high_score)
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Write logs to this file; filtered by RUST_LOG (default: info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty, Theme),
    Quit,
}

fn draw_menu<W: Write>(
    out: &mut W,
    high_score: u32,
    difficulty: Difficulty,
    theme: Theme,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  CORPORATE  RUNNER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if high_score > 0 {
        let hs_str = format!("Best Score: {}", high_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(6),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(&str, Difficulty, &str)] = &[
        ("1", Difficulty::Easy, "Slower pace, floatier jumps"),
        ("2", Difficulty::Normal, "The standard commute"),
        ("3", Difficulty::Expert, "Fast, heavy, 1.5x points"),
    ];

    for (i, (key, option, desc)) in options.iter().enumerate() {
        let (label, color) = display::difficulty_label(*option);
        let marker = if *option == difficulty { "▶" } else { " " };
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(16), row))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(marker))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" [{}] ", key)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" - {}", desc)))?;
    }

    let theme_str = format!("[T] Theme: {}", theme.key().to_uppercase());
    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::Blue))?;
    out.queue(Print(theme_str))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("ENTER : Start   1-3 : Start at level   Q : Quit"))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 5))?;
    out.queue(Print("In game: ↑/W jump, ↓/S duck, drag mouse to swipe"))?;

    out.queue(style::ResetColor)?;
    out.flush()
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
    mut difficulty: Difficulty,
    mut theme: Theme,
) -> std::io::Result<MenuResult> {
    draw_menu(out, high_score, difficulty, theme)?;

    // Block until the user makes a choice
    loop {
        let code = match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => code,
            Ok(Event::Resize(..)) => {
                draw_menu(out, high_score, difficulty, theme)?;
                continue;
            }
            Ok(_) => continue,
            Err(_) => return Ok(MenuResult::Quit),
        };
        match code {
            KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Easy, theme)),
            KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Normal, theme)),
            KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Expert, theme)),
            KeyCode::Enter => return Ok(MenuResult::Start(difficulty, theme)),
            KeyCode::Up => {
                difficulty = match difficulty {
                    Difficulty::Expert => Difficulty::Normal,
                    _ => Difficulty::Easy,
                };
            }
            KeyCode::Down => {
                difficulty = match difficulty {
                    Difficulty::Easy => Difficulty::Normal,
                    _ => Difficulty::Expert,
                };
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                theme = match theme {
                    Theme::Day => Theme::Night,
                    Theme::Night => Theme::Day,
                };
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => continue,
        }
        draw_menu(out, high_score, difficulty, theme)?;
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu,
    Restart,
}

/// Runs one game until the player quits, restarts or returns to the menu.
///
/// Input is gathered into an `InputTracker` between frames and handed to
/// the engine as a `HeldActions` snapshot, so jump and duck can be held
/// while one-shot keys (pause, quit) act immediately.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut RngSource<StdRng>,
    store: &mut FileHighScoreStore,
    reports_releases: bool,
) -> std::io::Result<LoopExit> {
    let mut tracker = InputTracker::new(reports_releases);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        tracker.key_pressed(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char(' ') => {
                                *state = toggle_pause(state);
                                tracker.clear();
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if state.game_over => {
                                return Ok(LoopExit::Restart);
                            }
                            KeyCode::Char('m') | KeyCode::Char('M') if state.game_over => {
                                return Ok(LoopExit::Menu);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => tracker.key_pressed(code, frame),
                    KeyEventKind::Release => tracker.key_released(&code),
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Down(MouseButton::Left) => tracker.pointer_down(column, row),
                    MouseEventKind::Up(MouseButton::Left) => {
                        tracker.pointer_up(column, row, frame);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        let held = tracker.held(frame);
        *state = advance(state, &held, rng, store);

        let (width, height) = terminal::size()?;
        display::render(out, state, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = run(&mut out, &rx, &args, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
    reports_releases: bool,
) -> std::io::Result<()> {
    let mut store = match &args.score_file {
        Some(path) => FileHighScoreStore::new(path),
        None => FileHighScoreStore::default(),
    };
    let seeded = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut rng = RngSource(seeded);
    let mut difficulty = Difficulty::from_key(&args.difficulty);
    let mut theme = Theme::from_key(&args.theme);
    info!(path = %store.path().display(), seed = ?args.seed, "session started");

    'menu: loop {
        match show_menu(out, rx, store.read_high_score(), difficulty, theme)? {
            MenuResult::Quit => break,
            MenuResult::Start(chosen, chosen_theme) => {
                difficulty = chosen;
                theme = chosen_theme;
                loop {
                    let mut state = start_game(difficulty, theme, &store);
                    match game_loop(out, &mut state, rx, &mut rng, &mut store, reports_releases)? {
                        LoopExit::Quit => break 'menu,
                        LoopExit::Menu => continue 'menu,
                        LoopExit::Restart => continue,
                    }
                }
            }
        }
    }
    Ok(())
}
