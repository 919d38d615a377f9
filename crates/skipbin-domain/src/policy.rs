//! Retention policy - the immutable limits governing how much trash is kept

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the subdirectory under the base path holding trashed files.
pub const TRASH_DIR_NAME: &str = "TrashBinFiles";

/// Name of the metadata document stored next to the trash directory.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Retention limits and layout for one trash root
///
/// A policy is a pure value object: it is constructed once, replaced
/// wholesale when configuration changes, and never mutated. Each limit axis
/// is independently optional; `None` means "infinite" and disables that
/// axis. A finite limit of zero means "allow nothing" (capacity reports 0
/// and cleanup purges aggressively), not a configuration error.
///
/// # Examples
///
/// ```
/// use skipbin_domain::RetentionPolicy;
///
/// // Keep at most 100 files, at most 1 GiB, for at most 30 days
/// let policy = RetentionPolicy::new("/tmp/.skipbin")
///     .with_retention_days(30)
///     .with_retention_bytes(1024 * 1024 * 1024)
///     .with_retention_file_count(100);
///
/// assert_eq!(policy.retention_days, Some(30));
/// assert!(policy.files_dir().ends_with("TrashBinFiles"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Root directory owning the trash subdirectory and the metadata file
    pub base_path: PathBuf,

    /// Max age in days before a file is eligible for purge; `None` = infinite
    #[serde(default)]
    pub retention_days: Option<u32>,

    /// Max cumulative size in bytes before oldest files are purged; `None` = infinite
    #[serde(default)]
    pub retention_bytes: Option<u64>,

    /// Max number of tracked files before oldest are purged; `None` = infinite
    #[serde(default)]
    pub retention_file_count: Option<usize>,

    /// Whether reconciliation against the physical directory runs after mutations
    #[serde(default)]
    pub delete_rogue_files: bool,

    /// Whether the host should trigger automatic cleanup (policy data only;
    /// the engine never self-schedules)
    #[serde(default)]
    pub auto_cleanup: bool,

    /// Minimum hours between automatic cleanups
    #[serde(default = "default_cleanup_interval_hours")]
    pub cleanup_interval_hours: u32,
}

fn default_cleanup_interval_hours() -> u32 {
    1
}

impl RetentionPolicy {
    /// Create a policy with all retention axes disabled (keep everything)
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            retention_days: None,
            retention_bytes: None,
            retention_file_count: None,
            delete_rogue_files: false,
            auto_cleanup: false,
            cleanup_interval_hours: default_cleanup_interval_hours(),
        }
    }

    /// Set the age axis (days)
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = Some(days);
        self
    }

    /// Set the byte-budget axis
    pub fn with_retention_bytes(mut self, bytes: u64) -> Self {
        self.retention_bytes = Some(bytes);
        self
    }

    /// Set the file-count axis
    pub fn with_retention_file_count(mut self, count: usize) -> Self {
        self.retention_file_count = Some(count);
        self
    }

    /// Enable reconciliation of the physical trash directory after mutations
    pub fn with_delete_rogue_files(mut self, enabled: bool) -> Self {
        self.delete_rogue_files = enabled;
        self
    }

    /// Enable host-driven automatic cleanup at the given interval
    pub fn with_auto_cleanup(mut self, interval_hours: u32) -> Self {
        self.auto_cleanup = true;
        self.cleanup_interval_hours = interval_hours;
        self
    }

    /// Directory holding the trashed file contents
    ///
    /// Derived deterministically from the base path. Creating the directory
    /// on disk is the filesystem collaborator's concern (see
    /// `skipbin-store`), not domain logic.
    pub fn files_dir(&self) -> PathBuf {
        self.base_path.join(TRASH_DIR_NAME)
    }

    /// Path of the persisted metadata document
    pub fn metadata_path(&self) -> PathBuf {
        self.base_path.join(METADATA_FILE_NAME)
    }

    /// Age limit in seconds, if the age axis is active
    pub fn retention_secs(&self) -> Option<u64> {
        self.retention_days.map(|days| u64::from(days) * 86_400)
    }
}
