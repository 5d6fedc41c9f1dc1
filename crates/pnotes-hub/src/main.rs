mod app;
mod demo_seed;

use std::io;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use pnotes_core::{config::Config, logging};
use pnotes_notes::NotesTool;

use app::App;

fn main() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    // Keep the guard alive for the whole run so buffered log lines get flushed
    let _log_guard = logging::init(&config).context("failed to initialise logging")?;
    info!(theme = %config.theme, folder = %config.default_folder, "Starting pnotes");

    let mut notes = NotesTool::new(config.default_folder.clone());
    if config.seed_demo_notes {
        let notebook = notes.notebook_mut();
        demo_seed::seed_demo_notes(notebook, Utc::now());
        let first = notebook.visible_ids().first().copied();
        notebook.select(first);
    }

    let mut app = App::new(Box::new(notes), config.theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = ?err, "Event loop failed");
        eprintln!("Error: {err:?}");
    }

    info!("Exiting pnotes");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if app.should_quit {
            return Ok(());
        }

        // Nothing animates, so block until the next event
        let ev = event::read()?;
        app.handle_event(ev);
    }
}
