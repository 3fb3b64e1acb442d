//! Sync and sync-if-needed command implementations

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use projsync_core::{FsArtifactStore, SnapshotProvider, SyncEngine, SyncReport, SyncSettings};
use projsync_fs::NormalizedPath;

use crate::cli::SyncArgs;
use crate::error::{CliError, Result};

/// Absolute form of the project directory, which may not exist yet.
pub fn resolve_project_dir(path: &Path) -> Result<NormalizedPath> {
    let absolute = if path.exists() {
        dunce::canonicalize(path)?
    } else if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(NormalizedPath::new(absolute))
}

/// Build an engine from the snapshot, settings and project directory.
pub fn build_engine(args: &SyncArgs) -> Result<SyncEngine> {
    let project_dir = resolve_project_dir(&args.project)?;
    let config = args.config.as_deref().map(NormalizedPath::new);
    let settings = SyncSettings::load_or_default(config.as_ref())?;
    let provider = SnapshotProvider::load(&NormalizedPath::new(&args.snapshot))?;

    tracing::debug!(
        project = %project_dir,
        style = settings.style.as_str(),
        "building sync engine"
    );

    Ok(SyncEngine::new(
        project_dir,
        settings,
        Arc::new(provider),
        Arc::new(FsArtifactStore::new()),
    )?)
}

/// Run the sync command
///
/// Regenerates the solution and every project.
pub fn run_sync(args: &SyncArgs) -> Result<()> {
    if !args.json {
        println!("{} Synchronizing project files...", "=>".blue().bold());
    }

    let engine = build_engine(args)?;
    let report = engine.full_sync()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.success() {
        return Err(CliError::user("Synchronization failed"));
    }
    Ok(())
}

/// Run the sync-if-needed command
///
/// Regenerates only the projects implicated by the given files.
pub fn run_sync_if_needed(args: &SyncArgs, affected: &[String], reimported: &[String]) -> Result<()> {
    let engine = build_engine(args)?;
    let report = engine.sync_if_needed_report(affected, reimported)?;

    if args.json {
        let output = serde_json::json!({
            "synced": report.is_some(),
            "report": &report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match &report {
            Some(report) => print_report(report),
            None => println!("{} Nothing to regenerate.", "OK".green().bold()),
        }
    }

    match report {
        Some(report) if !report.success() => Err(CliError::user("Synchronization failed")),
        _ => Ok(()),
    }
}

fn print_report(report: &SyncReport) {
    for diagnostic in &report.diagnostics {
        println!("   {} {}", "!".yellow(), diagnostic);
    }

    if !report.success() {
        println!("{} Synchronization failed:", "ERROR".red().bold());
        for error in &report.errors {
            println!("   {} {}", "!".red(), error);
        }
        return;
    }

    if report.is_noop() {
        println!("{} Already synchronized. No changes needed.", "OK".green().bold());
    } else {
        println!("{} Synchronization complete:", "OK".green().bold());
        for path in &report.written {
            println!("   {} {}", "+".green(), path);
        }
    }
    if !report.unchanged.is_empty() {
        println!("   {} unchanged", report.unchanged.len().to_string().dimmed());
    }
}
