//! Contact form TUI
//!
//! A Ratatui front end for the contact form validator, with debounced live
//! field checks and a throttled submit. `--check` validates a JSON payload
//! without opening the terminal UI.

mod app;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use contact_form::{validate_form, FormConfig, FormInput, TokioScheduler};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::task::LocalSet;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Contact form with live validation
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Validate a JSON form payload ({"name", "email", "message"}) and exit
    #[arg(long, value_name = "FILE")]
    check: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FormConfig::load_from(path)?,
        None => FormConfig::load()?,
    };

    // Initialize logging. The TUI owns the terminal, so its logs go to a file.
    let default_filter = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "contact_form=info".to_string());
    let to_terminal = cli.check.is_some();
    let writer = if to_terminal {
        BoxMakeWriter::new(io::stderr)
    } else {
        match FormConfig::log_path() {
            Some(path) => BoxMakeWriter::new(Mutex::new(open_log_file(&path)?)),
            None => BoxMakeWriter::new(io::sink),
        }
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(to_terminal),
        )
        .init();

    if let Some(path) = &cli.check {
        let code = check_file(path)?;
        std::process::exit(code);
    }

    // Timers are spawn_local tasks, so the whole UI runs inside a LocalSet
    LocalSet::new()
        .run_until(run_tui(config, started))
        .await
}

/// Open the session log for appending, creating its directory
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Validate a JSON payload, print any errors, and return the exit code
fn check_file(path: &Path) -> Result<i32> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let input: FormInput = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid form payload", path.display()))?;

    let errors = validate_form(&input);
    if errors.is_empty() {
        tracing::debug!(path = %path.display(), "Payload is valid");
        println!("OK");
        Ok(0)
    } else {
        for msg in &errors {
            println!("{msg}");
        }
        Ok(1)
    }
}

async fn run_tui(config: FormConfig, started: Instant) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config, TokioScheduler::new());
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Contact form ready"
    );
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<TokioScheduler>,
) -> Result<()> {
    loop {
        // Apply whatever the debounce/throttle timers queued since last frame
        app.process_inbox();

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Short poll so timer tasks get to run between frames
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.request_quit();
                } else {
                    app.handle_key(key);
                }
            }
        }

        // Let due spawn_local timers fire
        tokio::task::yield_now().await;

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
