//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// projsync - Keep IDE project and solution files in step with a unit graph
#[derive(Parser, Debug)]
#[command(name = "projsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Inputs shared by the sync commands
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    /// Directory receiving the solution and project files
    #[arg(short, long, env = "PROJSYNC_PROJECT", default_value = ".")]
    pub project: PathBuf,

    /// JSON snapshot of the unit graph
    #[arg(short, long, env = "PROJSYNC_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long, env = "PROJSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output the sync report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Regenerate the solution and every project
    ///
    /// Examples:
    ///   projsync sync --snapshot unit-graph.json
    ///   projsync sync -p Game -s unit-graph.json -c projsync.toml
    Sync {
        #[command(flatten)]
        args: SyncArgs,
    },

    /// Regenerate only what a set of changed files implicates
    ///
    /// Does nothing until a full sync has produced the solution.
    SyncIfNeeded {
        #[command(flatten)]
        args: SyncArgs,

        /// Added, deleted, moved or modified asset
        #[arg(short, long = "affected")]
        affected: Vec<String>,

        /// Reimported asset
        #[arg(short, long = "reimported")]
        reimported: Vec<String>,
    },

    /// Print the identifier of a unit or of the aggregate
    Id {
        /// Aggregate (solution) name
        #[arg(long)]
        aggregate: String,

        /// Unit name; prints the unit's project id
        #[arg(long, conflicts_with = "extension")]
        unit: Option<String>,

        /// Primary source extension; prints the aggregate's project-type id
        #[arg(long, default_value = "cs")]
        extension: String,
    },
}
