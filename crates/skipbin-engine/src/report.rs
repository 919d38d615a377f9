//! Per-item outcomes for batch operations
//!
//! Batch operations process every file best-effort and return a report
//! carrying one outcome per processed file, so callers can see exactly
//! which files were skipped and why.

use std::path::PathBuf;

/// Outcome of one file within a batch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// The file was moved into the bin
    Moved,

    /// The file was restored to its original path
    Restored,

    /// The file was permanently deleted
    Purged,

    /// The file's callback reported failure; the batch continued without it
    Skipped {
        /// Human-readable reason for the skip
        reason: String,
    },
}

/// One processed file and what happened to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Original path of the processed file
    pub path: PathBuf,

    /// What happened to it
    pub status: ItemStatus,
}

/// Ordered per-item results of one batch operation
///
/// A report existing at all means the batch ran to completion; individual
/// items may still have been skipped. `is_complete` distinguishes the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Outcomes in input order
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Report for an empty batch
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record an outcome for one file
    pub fn record(&mut self, path: PathBuf, status: ItemStatus) {
        self.outcomes.push(ItemOutcome { path, status });
    }

    /// Whether every item in the batch succeeded
    pub fn is_complete(&self) -> bool {
        !self.outcomes.iter().any(|o| matches!(o.status, ItemStatus::Skipped { .. }))
    }

    /// Number of items that succeeded
    pub fn succeeded(&self) -> usize {
        self.outcomes.len() - self.skipped()
    }

    /// Number of items that were skipped
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ItemStatus::Skipped { .. }))
            .count()
    }

    /// Whether the batch processed no items
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Fold another report's outcomes into this one
    pub fn merge(&mut self, other: BatchReport) {
        self.outcomes.extend(other.outcomes);
    }
}
