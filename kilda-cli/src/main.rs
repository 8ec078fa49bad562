use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::time::Duration;

mod api;
mod cli;
mod config;
mod services;
mod tui;

#[cfg(test)]
mod test_support;

use cli::commands::{TuiArgs, switch, switches};
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    let mut config = Config::load()?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }
    log::info!("Using OpenKilda API at {}", config.api.base_url);

    match cli.command.unwrap_or(Commands::Tui(TuiArgs::default())) {
        Commands::Tui(args) => run_tui(&config, &args.initial_url()).await,
        Commands::Switch(args) => switch::handle_switch_command(args, &config).await,
        Commands::Switches(args) => switches::handle_switches_command(args, &config).await,
    }
}

/// Log to the data directory so the TUI keeps the terminal to itself.
/// Falls back to stderr when the log file cannot be opened.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    match config::log_file_path().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))
    }) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Logging to stderr: {:#}", e),
    }

    builder.init();
}

async fn run_tui(config: &Config, initial_url: &str) -> Result<()> {
    let (services, overlays) = services::bootstrap(config, initial_url).await?;
    let runtime = tui::MultiAppRuntime::new(
        services,
        overlays,
        Duration::from_millis(config.ui.tick_rate_ms),
    );

    let mut terminal = ratatui::init();
    let result = runtime.run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = &result {
        log::error!("Console exited with error: {:#}", e);
    }
    result
}
