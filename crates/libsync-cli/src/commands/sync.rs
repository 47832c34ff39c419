//! Sync command implementation
//!
//! Prints one line per file as the engine reports it, then a summary.

use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};

use libsync_core::{
    Classification, ConfigResolver, DirectorySyncer, Error, FileAction, FileSyncOutcome,
    RunStatistics, SyncObserver, SyncOptions, SyncPair,
};

use crate::error::Result;

/// Run the sync command
///
/// Resolves the categories under `source_root`, syncs them and prints the
/// summary. Per-file failures are reported inline and do not make this fail;
/// only configuration problems do.
pub fn run_sync(
    source_root: &Path,
    destination: Option<PathBuf>,
    options: SyncOptions,
) -> Result<RunStatistics> {
    let resolver = ConfigResolver::new(source_root).with_destination(destination);
    let pairs = resolver.resolve()?;

    if options.dry_run {
        println!(
            "{} Dry run: previewing changes, nothing will be written",
            "=>".blue().bold()
        );
    } else {
        println!("{} Syncing library...", "=>".blue().bold());
    }

    let mut console = ConsoleObserver;
    let stats = DirectorySyncer::new(options).run(&pairs, &mut console);

    println!();
    for line in summary_lines(&stats, &options) {
        println!("{}", line);
    }

    Ok(stats)
}

/// Prints engine events to stdout as they happen
struct ConsoleObserver;

impl SyncObserver for ConsoleObserver {
    fn category_started(&mut self, pair: &SyncPair) {
        println!();
        println!(
            "{} {}",
            pair.label.bold(),
            format!("({} -> {})", pair.source.display(), pair.destination.display()).dimmed()
        );
    }

    fn missing_source(&mut self, pair: &SyncPair) {
        println!(
            "   {} source directory {} not found, skipping",
            "WARN".yellow().bold(),
            pair.source.display()
        );
    }

    fn destination_created(&mut self, pair: &SyncPair, dry_run: bool) {
        let verb = if dry_run { "Would create" } else { "Created" };
        println!("   {} {} {}", "+".green(), verb, pair.destination.display());
    }

    fn category_failed(&mut self, _pair: &SyncPair, error: &Error) {
        println!("   {} {}", "!".red().bold(), error);
    }

    fn file_checking(&mut self, pair: &SyncPair, relative_name: &str) {
        println!(
            "   {}",
            format!("checking {}/{}", pair.label, relative_name).dimmed()
        );
    }

    fn file_synced(&mut self, _pair: &SyncPair, outcome: &FileSyncOutcome) {
        println!("   {} {}", marker(outcome.classification), file_line(outcome));

        if let Some(diff) = outcome.diff.as_deref().filter(|d| !d.is_empty()) {
            for line in diff.lines() {
                println!("      {}", colorize_diff_line(line));
            }
        }
    }

    fn file_failed(&mut self, _pair: &SyncPair, relative_name: &str, error: &Error) {
        println!("   {} {}: {}", "!".red().bold(), relative_name, error);
    }
}

fn marker(classification: Classification) -> ColoredString {
    match classification {
        Classification::Unchanged => "=".dimmed(),
        Classification::New => "+".green().bold(),
        Classification::Updated => "~".yellow().bold(),
    }
}

/// File name plus what happened to it, without the marker.
fn file_line(outcome: &FileSyncOutcome) -> String {
    let note = match (outcome.action, outcome.classification) {
        (FileAction::Previewed, Classification::New) => Some("(would create)".to_string()),
        (FileAction::Previewed, _) => Some("(would update)".to_string()),
        (FileAction::BackedUpAndWritten, _) => outcome
            .backup_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| format!("(backup: {})", name.to_string_lossy())),
        _ => None,
    };

    match note {
        Some(note) => format!("{} {}", outcome.relative_name, note),
        None => outcome.relative_name.clone(),
    }
}

fn colorize_diff_line(line: &str) -> ColoredString {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold()
    } else if line.starts_with("@@") {
        line.cyan()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else {
        line.normal()
    }
}

/// Summary printed after the run.
fn summary_lines(stats: &RunStatistics, options: &SyncOptions) -> Vec<String> {
    let mut lines = vec![
        "Summary:".to_string(),
        format!("  Unchanged: {}", stats.unchanged),
        format!("  New: {}", stats.new),
        format!("  Updated: {}", stats.updated),
    ];
    if stats.skipped > 0 {
        lines.push(format!("  Skipped: {}", stats.skipped));
    }

    lines.push(String::new());
    if options.dry_run {
        lines.push("Dry run: no changes were applied.".to_string());
    } else if stats.total_changed() > 0 {
        lines.push(format!("Synced {} file(s).", stats.total_changed()));
    } else if stats.skipped > 0 {
        lines.push("No files were synced.".to_string());
    } else {
        lines.push("Everything is already up to date.".to_string());
    }
    lines
}
