//! Trait definitions for external interactions
//!
//! These traits define the boundary between the domain logic and the host:
//! physical file operations, directory listing, time, and metadata
//! persistence. Default filesystem implementations live in `skipbin-store`;
//! hosts may substitute their own (or test doubles) freely.

use crate::BinMetadata;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Moves a file or directory between two paths
///
/// Returns plain success: a `false` result marks the individual file as
/// failed and the batch continues. Richer error reporting stays on the
/// engine side.
pub trait FileMover {
    /// Move `source` to `destination`, returning whether the move succeeded
    fn move_file(&self, source: &Path, destination: &Path) -> bool;
}

/// Permanently deletes a file or directory
pub trait FileDeleter {
    /// Delete the file at `path`, returning whether the delete succeeded
    fn delete_file(&self, path: &Path) -> bool;
}

/// One file observed in a physical directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    /// File name within the listed directory
    pub name: String,

    /// Whether the listed file is a directory
    pub is_directory: bool,

    /// Full path of the listed file
    pub path: PathBuf,

    /// Size in bytes (cumulative for directories)
    pub size_bytes: u64,
}

/// Lists the contents of a physical directory
pub trait DirectoryLister {
    /// List the files directly under `dir`
    fn list_files(&self, dir: &Path) -> Vec<ListedFile>;
}

/// Source of epoch time for retention decisions
///
/// All age computations and cleanup-interval checks go through this trait
/// so tests can pin the clock.
pub trait Clock {
    /// Current time in seconds since the Unix epoch (UTC)
    fn now_epoch_secs(&self) -> u64;
}

/// Wall-clock `Clock` backed by `SystemTime`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Loads and saves the persisted metadata document
///
/// Implemented by the infrastructure layer (`skipbin-store`). `load`
/// returns `Ok(None)` when no document exists yet; the engine treats any
/// load error as "start empty" and never fails construction over it.
pub trait MetadataStore {
    /// Error type for store operations
    type Error: std::fmt::Display;

    /// Load the persisted metadata, if any exists
    fn load(&self) -> Result<Option<BinMetadata>, Self::Error>;

    /// Persist the full metadata snapshot
    fn save(&self, metadata: &BinMetadata) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotone_enough() {
        let clock = SystemClock;
        let a = clock.now_epoch_secs();
        let b = clock.now_epoch_secs();
        assert!(b >= a);
        assert!(a > 1_600_000_000); // after Sep 2020, sanity only
    }
}
