//! Fairway - a terminal golf scorecard
//!
//! Enter strokes hole by hole, watch the leaderboard, pick up where you left off.

mod app;
mod cli;
mod config;
mod error;
mod logging;
mod round;
mod storage;
mod tui;

use app::{App, Screen, Unsupported, WakeLock};
use clap::Parser;
use config::{Config, ConfigSource};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use error::AppError;
use std::path::Path;
use std::time::Duration;
use storage::{SessionStore, Storage};
use tui::Tui;

fn main() -> Result<(), AppError> {
    let args = cli::Args::parse();

    let (config, config_source) = match &args.config {
        Some(path) => (Config::load(path)?, ConfigSource::File(path.clone())),
        None => Config::load_default(),
    };

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| config.storage.data_dir.clone())
        .or_else(|| Storage::data_dir().ok());

    let log_filter = args.log_filter.as_deref().unwrap_or(&config.logging.filter);
    if let Some(dir) = &data_dir {
        if let Err(e) = logging::init(dir, log_filter) {
            eprintln!("warning: logging disabled: {}", e);
        }
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "fairway starting");
    match &config_source {
        ConfigSource::Invalid(e) => tracing::warn!(error = %e, "config file ignored; using defaults"),
        source => tracing::info!("config: {}", source),
    }

    let store = open_store(data_dir.as_deref(), &config.storage.key)?;
    let wake = if config.display.keep_awake {
        WakeLock::new(Box::new(Unsupported))
    } else {
        WakeLock::disabled()
    };
    let mut app = App::new(store, wake, config.setup.round_config());

    // Initialize terminal
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    // Main event loop
    let poll_rate = Duration::from_millis(250);
    while !app.should_quit {
        terminal.draw(|frame| tui::render(frame, &app))?;

        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key);
                }
            }
        }
    }

    terminal.exit()?;
    tracing::info!("fairway exiting");
    Ok(())
}

fn open_store(data_dir: Option<&Path>, key: &str) -> Result<Box<dyn SessionStore>, AppError> {
    let storage = Storage::open_or_in_memory(data_dir)?.with_key(key);
    tracing::debug!(key = storage.key(), "snapshot key");
    Ok(Box::new(storage))
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Setup { .. } => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.quit(),
            KeyCode::Up => app.setup_up(),
            KeyCode::Down | KeyCode::Tab => app.setup_down(),
            KeyCode::Left | KeyCode::Char('-') => app.setup_left(),
            KeyCode::Right | KeyCode::Char('+') => app.setup_right(),
            KeyCode::Enter => app.setup_select(),
            _ => {}
        },
        Screen::Scorecard => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.quit(),
            KeyCode::Up => app.hole_up(),
            KeyCode::Down => app.hole_down(),
            KeyCode::Left => app.player_left(),
            KeyCode::Right | KeyCode::Tab => app.player_right(),
            KeyCode::Enter => app.on_submit(),
            KeyCode::Backspace => app.on_backspace(),
            KeyCode::Delete => app.on_clear_cell(),
            KeyCode::Char('u') => app.undo(),
            KeyCode::Char('r') => app.request_reset(),
            KeyCode::Char(c) => app.on_char(c),
            _ => {}
        },
        Screen::ConfirmReset => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_reset(),
            _ => {}
        },
    }
}
