//! Skipbin CLI - a recycle bin for the command line.

mod cli;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use skipbin_domain::{BinEntry, Clock, RetentionPolicy, SystemClock};
use skipbin_engine::TrashBin;
use skipbin_store::{JsonMetadataStore, StdFileOps};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type Bin = TrashBin<JsonMetadataStore, StdFileOps, StdFileOps, StdFileOps, SystemClock>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let base = config.resolve_base(cli.base)?;
    let policy = config.to_policy(base);

    StdFileOps::ensure_dirs(&policy)
        .with_context(|| format!("cannot create trash directory under {}", policy.base_path.display()))?;

    let bin = TrashBin::new(
        policy.clone(),
        JsonMetadataStore::new(policy.metadata_path()),
        StdFileOps,
        StdFileOps,
        StdFileOps,
        SystemClock,
    );

    run_auto_cleanup(&bin, &policy);

    match cli.command {
        Command::Trash { paths } => {
            let entries = entries_for_paths(&paths)?;
            let report = bin.move_to_bin(&entries, true)?;
            println!("{}", output::report_summary(&report, "trashed"));
        }
        Command::Restore { paths, all } => {
            let report = if all {
                bin.restore_bin()?
            } else {
                let entries = tracked_entries_for(&bin, &paths)?;
                bin.restore(&entries, true)?
            };
            println!("{}", output::report_summary(&report, "restored"));
        }
        Command::Delete { paths } => {
            // Untracked paths still get an entry so the engine's fallback
            // deletes them in place.
            let entries: Vec<BinEntry> = paths
                .iter()
                .map(|p| entry_for_path(p).unwrap_or_else(|_| BinEntry::new(file_name(p), false, p, 0)))
                .collect();
            let report = bin.delete_permanently(&entries, true)?;
            println!("{}", output::report_summary(&report, "deleted"));
        }
        Command::List => {
            let files = bin.list_files()?;
            println!("{}", output::entries_table(&files));
        }
        Command::Empty => {
            let report = bin.empty_bin()?;
            println!("{}", output::report_summary(&report, "deleted"));
        }
        Command::Cleanup => {
            let report = bin.trigger_cleanup()?;
            println!("{}", output::report_summary(&report, "purged"));
        }
        Command::Capacity => {
            let files = bin.list_files()?;
            let total: u64 = files.iter().map(|e| e.size_bytes).sum();
            match bin.capacity_percent()? {
                Some(pct) => println!(
                    "{} file(s), {} - {}% of configured limits",
                    files.len(),
                    output::human_size(total),
                    pct
                ),
                None => println!(
                    "{} file(s), {} - no finite limits configured",
                    files.len(),
                    output::human_size(total)
                ),
            }
        }
    }

    Ok(())
}

/// Run interval-gated auto cleanup, keeping the last-run stamp next to the
/// metadata file. Failures here never block the requested command.
fn run_auto_cleanup(bin: &Bin, policy: &RetentionPolicy) {
    let stamp_path = policy.base_path.join(".last_cleanup");
    let last = fs::read_to_string(&stamp_path)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);

    match bin.maybe_cleanup(last) {
        Ok(true) => {
            let now = SystemClock.now_epoch_secs();
            if let Err(e) = fs::write(&stamp_path, now.to_string()) {
                tracing::warn!(error = %e, "cannot record cleanup stamp");
            }
        }
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "auto cleanup failed"),
    }
}

fn entries_for_paths(paths: &[PathBuf]) -> Result<Vec<BinEntry>> {
    paths.iter().map(|p| entry_for_path(p)).collect()
}

fn entry_for_path(path: &Path) -> Result<BinEntry> {
    let meta = fs::symlink_metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?;
    let size = if meta.is_dir() {
        StdFileOps::size_of(path)
    } else {
        meta.len()
    };
    Ok(BinEntry::new(file_name(path), meta.is_dir(), path, size))
}

fn tracked_entries_for(bin: &Bin, paths: &[PathBuf]) -> Result<Vec<BinEntry>> {
    let tracked = bin.list_files()?;
    let mut selected = Vec::new();
    for path in paths {
        match tracked.iter().find(|e| e.original_path == *path) {
            Some(entry) => selected.push(entry.clone()),
            None => anyhow::bail!("{} is not in the bin", path.display()),
        }
    }
    Ok(selected)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
