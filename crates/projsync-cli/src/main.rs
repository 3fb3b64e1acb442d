//! projsync CLI
//!
//! The command-line interface for generating IDE project files from a unit
//! graph snapshot.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} project file synchronizer", "projsync".green().bold());
            println!();
            println!("Run {} for available commands.", "projsync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync { args } => commands::run_sync(&args),
        Commands::SyncIfNeeded {
            args,
            affected,
            reimported,
        } => commands::run_sync_if_needed(&args, &affected, &reimported),
        Commands::Id {
            aggregate,
            unit,
            extension,
        } => commands::run_id(&aggregate, unit.as_deref(), &extension),
    }
}
