use clap::Parser;
use eyre::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::PathBuf;

mod cli;
mod commands;
mod config;
mod event;
mod webhook;

use cli::{Cli, Commands};
use config::{Config, LogLevel};

/// Append-mode log file under the local data dir
fn open_log_file() -> Result<(PathBuf, fs::File)> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hookrelay")
        .join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let path = log_dir.join("hookrelay.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("Failed to open log file")?;
    Ok((path, file))
}

/// RUST_LOG wins over the configured level. An unusable log file degrades to
/// stderr so a relay never fails because of logging.
fn setup_logging(log_level: &LogLevel) {
    let mut builder = env_logger::Builder::new();
    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.level_filter());
    }

    match open_log_file() {
        Ok((path, file)) => {
            builder.target(env_logger::Target::Pipe(Box::new(file))).init();
            debug!("Logging to {}", path.display());
        }
        Err(e) => {
            builder.target(env_logger::Target::Stderr).init();
            warn!("Log file unavailable, logging to stderr: {:#}", e);
        }
    }
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Emit { payload } => commands::emit::run(payload.as_deref(), quiet, &config),
        Commands::Send { action, data } => commands::send::run(&action, data.as_deref(), quiet, &config),
        Commands::Sign { body } => commands::sign::run(body.as_deref(), &config),
        Commands::Verify { signature, body } => commands::verify::run(&signature, body.as_deref(), quiet, &config),
        Commands::Events { format } => commands::events::run(cli::OutputFormat::resolve(format), &config),
        Commands::Config { action } => commands::config::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config errors fail fast; nothing is logged before this point
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config.log_level);

    run(cli, config).context("Command failed")?;

    Ok(())
}
