//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use libsync_core::SyncOptions;

/// libsync - Sync an agent, command and skill library into the assistant's config directory
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "libsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Preview changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Save an existing destination file to <file>.bak before overwriting it
    #[arg(long)]
    pub backup: bool,

    /// Report every file as it is checked
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not print diffs for updated files
    #[arg(long)]
    pub no_diff: bool,

    /// Library root holding the category directories [default: current directory]
    #[arg(long, env = "LIBSYNC_SOURCE", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Destination root [default: from libsync.toml, else ~/.claude]
    #[arg(long, env = "LIBSYNC_DEST", value_name = "DIR")]
    pub dest: Option<PathBuf>,
}

impl Cli {
    /// Options for the sync engine.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            dry_run: self.dry_run,
            create_backup: self.backup,
            verbose: self.verbose,
            show_diff: !self.no_diff,
        }
    }
}
