use std::io;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use ttrpg_notes::config::AppConfig;
use ttrpg_notes::tui::app::App;
use ttrpg_notes::tui::services::Services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let _log_guard = ttrpg_notes::core::logging::init_tui();
    log::info!("{} v{} starting", ttrpg_notes::NAME, ttrpg_notes::VERSION);

    let config = AppConfig::load();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx).context("Failed to set up notes client")?;
    let mut app = App::new(&config, event_rx, services);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app
    let result = app.run(&mut terminal, config.tui.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Event loop failed: {e}");
    }
    result.context("Terminal I/O failed")?;

    log::info!("Shutting down");
    Ok(())
}
