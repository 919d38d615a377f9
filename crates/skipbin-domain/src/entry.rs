//! Bin entry - one tracked trashed file

use crate::RetentionPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// One file tracked by the bin
///
/// Entries are immutable once constructed; an update is modeled as
/// remove-plus-reinsert of a fresh entry. The deletion timestamp is stamped
/// at construction when not supplied explicitly - the only place the domain
/// layer couples to wall-clock time at construction.
///
/// # Examples
///
/// ```
/// use skipbin_domain::BinEntry;
///
/// let entry = BinEntry::new("report.pdf", false, "/home/user/report.pdf", 4096);
/// assert_eq!(entry.name, "report.pdf");
/// assert!(entry.deleted_at > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinEntry {
    /// File name within the trash directory
    pub name: String,

    /// Whether the entry is a directory
    pub is_directory: bool,

    /// Original path the file was trashed from; unique per bin
    pub original_path: PathBuf,

    /// Size in bytes (cumulative for directories)
    pub size_bytes: u64,

    /// Deletion time in seconds since the Unix epoch (UTC)
    pub deleted_at: u64,
}

impl BinEntry {
    /// Create an entry stamped with the current wall clock
    pub fn new(
        name: impl Into<String>,
        is_directory: bool,
        original_path: impl Into<PathBuf>,
        size_bytes: u64,
    ) -> Self {
        Self::with_deleted_at(name, is_directory, original_path, size_bytes, now_epoch_secs())
    }

    /// Create an entry with an explicit deletion timestamp
    pub fn with_deleted_at(
        name: impl Into<String>,
        is_directory: bool,
        original_path: impl Into<PathBuf>,
        size_bytes: u64,
        deleted_at: u64,
    ) -> Self {
        Self {
            name: name.into(),
            is_directory,
            original_path: original_path.into(),
            size_bytes,
            deleted_at,
        }
    }

    /// Location of this entry's contents inside the trash directory
    pub fn trash_path(&self, policy: &RetentionPolicy) -> PathBuf {
        policy.files_dir().join(&self.name)
    }
}

fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
