//! Rogue - Entry Point
//!
//! Initializes logging and the terminal, starts a session and runs the
//! frame loop. An optional first argument names a RON config file.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use rogue::game::{Game, SessionError};
use rogue::ui::App;
use rogue::GameConfig;

/// Target frames per second for the game loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// Fresh layouts to try when generation runs out of room
const GENERATION_RETRIES: u32 = 8;

const DEFAULT_CONFIG: &str = "rogue.ron";

fn main() -> Result<()> {
    // Log to a file so output does not interfere with the TUI
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("rogue.log")
        .context("failed to open rogue.log")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Rogue v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = GameConfig::load_or_default(&config_path);
    let mut game = start_session(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_game_loop(&mut terminal, &mut app, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Rogue shut down cleanly");
    result
}

/// Create a session, drawing a new layout when one has no room for its
/// rooms or items. A fixed seed is only tried once.
fn start_session(config: GameConfig) -> Result<Game> {
    let attempts = if config.seed.is_some() { 1 } else { GENERATION_RETRIES };
    let mut last_error = None;

    for attempt in 1..=attempts {
        match Game::new(config.clone()) {
            Ok(game) => return Ok(game),
            Err(SessionError::Generation(e)) => {
                log::warn!("Layout attempt {} failed: {}", attempt, e);
                last_error = Some(e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    match last_error {
        Some(e) => Err(SessionError::Generation(e).into()),
        None => anyhow::bail!("no layout attempts were made"),
    }
}

/// Main game loop
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        // Handle input
        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    match app.handle_input(key, game) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => log::warn!("Input handling error: {}", e),
                    }
                }
            }
        }

        game.update(delta);

        terminal.draw(|frame| {
            app.render(frame, game);
        })?;

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}
