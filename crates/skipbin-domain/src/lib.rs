//! Skipbin Domain Layer
//!
//! This crate contains the core data model and business logic for the
//! skipbin recycle-bin engine. It defines the fundamental value objects
//! and the trait interfaces that the infrastructure layers depend upon.
//!
//! ## Key Concepts
//!
//! - **BinEntry**: one tracked trashed file - identity, size, deletion time
//! - **RetentionPolicy**: immutable limits (age, bytes, file count) plus
//!   trash-directory layout derived from a base path
//! - **BinMetadata**: the aggregate of all tracked entries; owns the
//!   purge-selection algorithm and the capacity calculation
//! - **Collaborator traits**: the filesystem and persistence boundaries
//!   (`FileMover`, `FileDeleter`, `DirectoryLister`, `Clock`,
//!   `MetadataStore`) implemented by other crates or by the host
//!
//! ## Architecture
//!
//! This crate holds pure logic only: no filesystem syscalls, no wall-clock
//! reads outside `BinEntry::new` and `SystemClock`, no serialization beyond
//! the serde derives on the persisted types. Infrastructure implementations
//! live in `skipbin-store`; orchestration lives in `skipbin-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod metadata;
pub mod policy;
pub mod traits;

// Re-exports for convenience
pub use entry::BinEntry;
pub use metadata::BinMetadata;
pub use policy::RetentionPolicy;
pub use traits::{Clock, DirectoryLister, FileDeleter, FileMover, ListedFile, MetadataStore, SystemClock};
