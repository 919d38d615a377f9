//! Error types for engine operations

use thiserror::Error;

/// Errors that can occur during engine operations
///
/// Per-file callback failures are never errors: they surface as `Skipped`
/// outcomes in the batch report while the batch continues. Only conditions
/// that make the engine itself unusable are reported here.
#[derive(Error, Debug)]
pub enum BinError {
    /// The engine's state lock was poisoned by a panicking caller
    #[error("engine state lock poisoned")]
    Poisoned,

    /// Storage error from an explicitly requested persist
    #[error("storage error: {0}")]
    Store(String),
}
