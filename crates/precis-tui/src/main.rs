#![deny(unsafe_code)]

//! Précis TUI: paste a passage, summarize it, read the logs.

mod app;
mod keymap;
mod panels;
mod theme;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use precis_config::AppConfig;
use precis_core::{JobUpdate, LogCollector, job};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Effect};

const CONFIG_PATH: &str = "precis.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = PathBuf::from(CONFIG_PATH);
    let config = AppConfig::load_or_default(&config_path)
        .await
        .with_context(|| format!("invalid configuration at '{CONFIG_PATH}'"))?;

    // Events are captured for the Logs panel; nothing is written to the
    // terminal while it is in raw mode.
    let collector = LogCollector::new(config.ui.log_capacity);
    let log_reader = collector.reader();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(collector)
        .init();

    let source = if config_path.exists() {
        CONFIG_PATH
    } else {
        "defaults"
    };
    info!(version = precis_core::build_info::VERSION, config = source, "starting Précis TUI");

    let mut app = App::new(&config, source, log_reader);

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            // Undo whichever setup steps succeeded.
            let _ = restore_terminal();
            return Err(e);
        }
    };

    let result = run(&mut terminal, &mut app, Duration::from_millis(config.ui.tick_rate_ms)).await;

    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

/// Leave raw mode, the alternate screen, and bracketed paste. Every step is
/// attempted; the first failure is returned.
fn restore_terminal() -> Result<()> {
    let paste = io::stdout().execute(DisableBracketedPaste).map(|_| ());
    let raw = disable_raw_mode();
    let screen = io::stdout().execute(LeaveAlternateScreen).map(|_| ());
    paste.and(raw).and(screen)?;
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel::<JobUpdate>();

    while !app.should_quit {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(tick_rate)? {
            let effect = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        app.should_quit = true;
                        Effect::None
                    } else {
                        app.handle_key(key.code)
                    }
                }
                Event::Paste(text) => {
                    app.handle_paste(&text);
                    Effect::None
                }
                _ => Effect::None,
            };

            if let Effect::Spawn { job: id, request } = effect {
                // Detached: abandoned jobs finish on their own and their
                // updates are dropped by the app.
                drop(job::spawn_summary(id, request, updates_tx.clone()));
            }
        }

        while let Ok(update) = updates_rx.try_recv() {
            app.apply_update(update);
        }

        app.tick();
    }

    info!("shutting down");
    Ok(())
}
