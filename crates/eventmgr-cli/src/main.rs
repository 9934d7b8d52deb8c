mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{letters, stats, Context};
use crate::error::{exit_code_for, report_error};
use eventmgr_config as config;

#[derive(Debug, Parser)]
#[command(
    name = "event-manager",
    version,
    about = "Write thank-you letters to event attendees"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up representatives and write one letter per attendee (default)
    Letters,
    /// Show registration counts by hour and by weekday
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let command = command.unwrap_or(Command::Letters);
    let app_config = match config::load(config_path.clone()) {
        Ok(app_config) => app_config,
        Err(err) if quiet_without_roster(&command, config_path.as_deref()) => {
            debug!(error = %err, "config unusable and roster not found, nothing to do");
            return Ok(());
        }
        Err(err) => return Err(err).with_context(|| "load config"),
    };
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let ctx = Context {
        json,
        config: &app_config,
    };

    match command {
        Command::Letters => letters::generate_letters(&ctx),
        Command::Stats => stats::show_stats(&ctx),
    }
}

/// A letters run with no roster at the default path ends quietly even when
/// the implicit config file cannot be used.
fn quiet_without_roster(command: &Command, config_path: Option<&Path>) -> bool {
    matches!(command, Command::Letters)
        && config_path.is_none()
        && !Path::new(config::DEFAULT_INPUT).exists()
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
