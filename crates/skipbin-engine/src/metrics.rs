//! Cumulative metrics for engine operations

/// Counters accumulated across one engine instance's lifetime
///
/// Tracks files moved, restored, and purged, bytes reclaimed by purges, and
/// cleanup cycles run. Useful for host telemetry; resettable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinMetrics {
    /// Files successfully moved into the bin
    pub moved: usize,

    /// Files successfully restored to their original paths
    pub restored: usize,

    /// Files permanently deleted (explicit deletes and cleanup purges)
    pub purged: usize,

    /// Bytes reclaimed by purges
    pub bytes_reclaimed: u64,

    /// Cleanup cycles executed
    pub cleanup_runs: usize,
}

impl BinMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful move into the bin
    pub fn record_move(&mut self) {
        self.moved += 1;
    }

    /// Record a successful restore
    pub fn record_restore(&mut self) {
        self.restored += 1;
    }

    /// Record a purge of the given size
    pub fn record_purge(&mut self, size_bytes: u64) {
        self.purged += 1;
        self.bytes_reclaimed += size_bytes;
    }

    /// Record a completed cleanup cycle
    pub fn record_cleanup(&mut self) {
        self.cleanup_runs += 1;
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of the counters
    pub fn summary(&self) -> String {
        format!(
            "Bin metrics: {} moved, {} restored, {} purged ({} bytes reclaimed), {} cleanup runs",
            self.moved, self.restored, self.purged, self.bytes_reclaimed, self.cleanup_runs
        )
    }
}
