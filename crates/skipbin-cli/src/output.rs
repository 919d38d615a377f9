//! Output formatting for the CLI.

use skipbin_domain::BinEntry;
use skipbin_engine::{BatchReport, ItemStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Render the bin contents as a table, newest first.
pub fn entries_table(entries: &[BinEntry]) -> String {
    if entries.is_empty() {
        return "bin is empty".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Name", "Type", "Original path", "Size", "Deleted at"]);
    for entry in entries {
        builder.push_record([
            entry.name.clone(),
            if entry.is_directory { "dir".into() } else { "file".into() },
            entry.original_path.display().to_string(),
            human_size(entry.size_bytes),
            format_epoch(entry.deleted_at),
        ]);
    }

    builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// One-line summary of a batch report, with skips spelled out.
pub fn report_summary(report: &BatchReport, verb: &str) -> String {
    let mut lines = vec![format!(
        "{} {} file(s), {} skipped",
        verb,
        report.succeeded(),
        report.skipped()
    )];
    for outcome in &report.outcomes {
        if let ItemStatus::Skipped { reason } = &outcome.status {
            lines.push(format!("  skipped {}: {}", outcome.path.display(), reason));
        }
    }
    lines.join("\n")
}

/// Human-readable byte count.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

fn format_epoch(epoch_secs: u64) -> String {
    chrono::DateTime::from_timestamp(epoch_secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_secs.to_string())
}
