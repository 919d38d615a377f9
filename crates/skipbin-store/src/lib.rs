//! Skipbin Storage Layer
//!
//! Infrastructure implementations of the `skipbin-domain` collaborator
//! traits:
//!
//! - [`JsonMetadataStore`]: one JSON metadata document per trash root,
//!   written atomically (temp file + rename) so a crash mid-write never
//!   leaves a truncated document
//! - [`StdFileOps`]: `std::fs`-backed file mover, deleter, and directory
//!   lister for hosts that do not bring their own
//!
//! # Examples
//!
//! ```no_run
//! use skipbin_domain::{MetadataStore, RetentionPolicy};
//! use skipbin_store::{JsonMetadataStore, StdFileOps};
//!
//! let policy = RetentionPolicy::new("/tmp/.skipbin");
//! StdFileOps::ensure_dirs(&policy).unwrap();
//!
//! let store = JsonMetadataStore::new(policy.metadata_path());
//! let loaded = store.load().unwrap(); // None on first run
//! # let _ = loaded;
//! ```

#![warn(missing_docs)]

mod fs;
mod json_store;

pub use fs::StdFileOps;
pub use json_store::JsonMetadataStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error while reading or replacing the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be parsed
    #[error("Malformed metadata document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The atomic replacement of the prior document failed
    #[error("Failed to replace metadata file: {0}")]
    Replace(String),
}
