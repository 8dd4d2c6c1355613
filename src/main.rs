//! skygaze - current weather and a short forecast in your terminal
//!
//! A terminal UI application that looks up a city on wttr.in and displays
//! current conditions plus an up-to-5-day forecast, with metric/imperial
//! unit switching and condition-themed colors.

mod app;
mod cli;
mod data;
mod ui;
mod units;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use cli::{Cli, StartupConfig};

/// Sets up a panic hook that restores the terminal before printing the panic
/// message. This ensures the terminal is usable even if the application
/// panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::new(config);

    // Initial render to show the loading state, then fetch the startup city
    terminal.draw(|f| ui::render_dashboard(f, &app))?;
    app.load_weather().await;

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| ui::render_dashboard(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // A submitted search: show the loading frame before suspending on
        // the network call. Awaiting here means a new search cannot start
        // while a fetch is outstanding.
        if app.fetch_requested {
            terminal.draw(|f| ui::render_dashboard(f, &app))?;
            app.load_weather().await;
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
