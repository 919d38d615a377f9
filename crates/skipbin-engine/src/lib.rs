//! Skipbin Engine
//!
//! The orchestrating layer of the skipbin recycle-bin library. [`TrashBin`]
//! coordinates the domain model (`skipbin-domain`) with host-injected
//! filesystem collaborators and a metadata store:
//!
//! - **move_to_bin / restore / delete_permanently**: batch operations with
//!   per-item outcomes; a callback failure skips that file and the batch
//!   continues
//! - **trigger_cleanup**: evaluates the retention policy (age, byte budget,
//!   file-count budget) and purges the selected candidates
//! - **maybe_cleanup**: host-scheduled automatic cleanup gated on the
//!   configured interval
//! - **remove_rogue_files**: reconciles metadata against the physical trash
//!   directory
//!
//! Every mutating operation is serialized behind one mutex per engine
//! instance and persists the full metadata snapshot on completion. The
//! engine never spawns threads or schedules work of its own.
//!
//! # Usage
//!
//! ```no_run
//! use skipbin_domain::{BinEntry, RetentionPolicy, SystemClock};
//! use skipbin_engine::TrashBin;
//! use skipbin_store::{JsonMetadataStore, StdFileOps};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = RetentionPolicy::new("/home/user/.skipbin")
//!     .with_retention_days(30)
//!     .with_retention_bytes(512 * 1024 * 1024);
//! StdFileOps::ensure_dirs(&policy)?;
//!
//! let bin = TrashBin::new(
//!     policy.clone(),
//!     JsonMetadataStore::new(policy.metadata_path()),
//!     StdFileOps,
//!     StdFileOps,
//!     StdFileOps,
//!     SystemClock,
//! );
//!
//! let doomed = BinEntry::new("draft.md", false, "/home/user/draft.md", 2048);
//! let report = bin.move_to_bin(&[doomed], true)?;
//! println!("moved {} file(s)", report.succeeded());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod metrics;
mod report;

pub use engine::TrashBin;
pub use error::BinError;
pub use metrics::BinMetrics;
pub use report::{BatchReport, ItemOutcome, ItemStatus};
