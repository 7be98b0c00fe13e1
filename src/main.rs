use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod app;
mod config;
mod error;
mod link;
mod models;
mod progress;
mod services;
mod tui;

use app::App;
use config::Config;
use error::Result;
use tui::{draw, handle_key_event, AppAction};

const PLAIN_TEXT_WIDTH: usize = 80;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let flag_value = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    // Load configuration
    let mut config = Config::load()?;
    if let Some(server_url) = flag_value("--server") {
        config.server_url = server_url;
    }

    let mut app = App::new(&config)?;

    // If a link was given, generate once and print instead of starting the TUI
    if let Some(link) = flag_value("--generate") {
        if let Err(e) = run_headless(&mut app, &link).await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Advance loading animation and pending reveal
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| draw(frame, app, now))?;

        // Poll for a finished generation request
        app.poll_generation_result();

        // Poll for events with timeout to allow async operations
        if event::poll(Duration::from_millis(100))? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, app.focus, app.show_help)
                }
                Event::Paste(text) => Some(AppAction::InputPaste(text)),
                _ => None,
            };

            if let Some(action) = action {
                if app.handle_action(action) {
                    return Ok(());
                }
            }
        }
    }
}

async fn run_headless(app: &mut App, link: &str) -> anyhow::Result<()> {
    app.handle_action(AppAction::InputPaste(link.to_string()));
    app.submit();
    app.await_generation().await;

    match (&app.result, &app.error_message) {
        (Some(result), _) => {
            print!("{}", result.to_plain_text(PLAIN_TEXT_WIDTH));
            Ok(())
        }
        (None, Some(message)) => Err(anyhow::anyhow!("{}", message)),
        (None, None) => Err(anyhow::anyhow!("no content was generated")),
    }
}
