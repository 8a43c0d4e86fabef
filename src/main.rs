//! Skycast - current weather conditions in your terminal
//!
//! A terminal UI application that looks up current weather for cities
//! worldwide: type a city name for debounced suggestions, pick one, and the
//! normalized conditions are rendered in place. The initial load geolocates
//! the current IP, falling back to a default city.

mod app;
mod cli;
mod config;
mod data;
mod history;
mod search;
mod ui;

use std::io;
use std::panic;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use app::App;
use cli::{Cli, StartupConfig};
use config::Config;
use history::{HistoryStore, RecentSearches};

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

/// Renders the UI: search bar on top, body below, key hints at the bottom,
/// with the suggestion panel and help overlay drawn over the body
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search bar
            Constraint::Min(0),    // body
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    ui::render_search_bar(frame, app, chunks[0]);

    if app.loading {
        render_loading(frame, chunks[1]);
    } else if let Some(error) = &app.error {
        render_error(frame, error, chunks[1]);
        // A refresh failure keeps the stale snapshot; nothing else to draw.
    } else if let Some(snapshot) = &app.snapshot {
        ui::render_conditions(frame, snapshot, chunks[1]);
    }

    render_key_hints(frame, chunks[2]);

    // The dropdown overlays the top of the body.
    ui::render_suggestion_panel(frame, app, chunks[1]);

    if app.show_help {
        ui::render_help(frame);
    }
}

/// Renders a centered message while a fetch is in flight
fn render_loading(frame: &mut ratatui::Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Fetching weather...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Renders the error banner for a failed fetch
fn render_error(frame: &mut ratatui::Frame, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(text, area);
}

/// Renders the one-line key hint bar
fn render_key_hints(frame: &mut ratatui::Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        " type to search \u{B7} Enter look up \u{B7} F5 refresh \u{B7} F1 help \u{B7} Esc quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(hints, area);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let config = Config::from_env();
    let recent = RecentSearches::load(HistoryStore::new());
    let mut app = App::new(config, recent);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial render so the loading state shows during the first fetch
    terminal.draw(|f| render_ui(f, &app))?;

    app.initial_load(&startup).await;

    // Main event loop
    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        // Service the work queued by the previous tick's input, so the
        // loading banner above was already drawn when a fetch blocks here
        if let Some(city) = app.take_pending_search() {
            app.run_search(&city).await;
        }

        if let Some((lat, lon)) = app.take_pending_refresh() {
            app.refresh(lat, lon).await;
        }

        // Fire the suggestion lookup once the debounce window has passed
        if let Some(request) = app.due_suggestion_request(Instant::now()) {
            let results = app.fetch_suggestions(&request.query).await;
            app.apply_suggestions(request.seq, results);
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
