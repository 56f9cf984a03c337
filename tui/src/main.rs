//! Lottery TUI Entry Point
//!
//! Launches the terminal lottery wheel.
//!
//! Usage:
//!   lottery-tui
//!
//! Environment:
//!   LOTTERY_CONFIG      Config file (default: ~/.config/lottery/lottery.toml)
//!   LOTTERY_LOG_FILE    Log file (default: lottery-tui.log in the temp dir)
//!   RUST_LOG            Log filter, e.g. `lottery_core=debug`

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lottery_core::load_config;
use lottery_tui::{audio, sounds, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging; stdout belongs to the TUI
    let log_path = std::env::var_os("LOTTERY_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("lottery-tui.log"));
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: lottery-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH was run without -t.");
        std::process::exit(1);
    }

    let config = load_config().context("Failed to load configuration")?;
    tracing::info!(source = %config.source(), "Configuration ready");

    let sounds = sounds::discover(&config.audio.sounds_dir).await;
    let audio = audio::backend(&config.audio);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let mut app = App::new(config, audio, sounds);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Show the winners after TUI closes
    if result.is_ok() {
        if let Some(goodbye) = app.goodbye() {
            println!("\n{goodbye}\n");
        }
    }

    // Propagate any errors
    result
}
