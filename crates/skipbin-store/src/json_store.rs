//! JSON metadata persistence with atomic replacement

use crate::StoreError;
use skipbin_domain::{BinMetadata, MetadataStore};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// `MetadataStore` backed by a single JSON document
///
/// Saves write the full snapshot to a temp file in the document's own
/// directory, flush it, and rename it over the prior document. Rename
/// within one directory is atomic on the platforms we target, so readers
/// only ever observe a complete document.
pub struct JsonMetadataStore {
    path: PathBuf,
}

impl JsonMetadataStore {
    /// Create a store for the document at `path`
    ///
    /// The parent directory must exist before the first save (see
    /// [`crate::StdFileOps::ensure_dirs`]).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the managed document
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl MetadataStore for JsonMetadataStore {
    type Error = StoreError;

    fn load(&self) -> Result<Option<BinMetadata>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        if raw.trim().is_empty() {
            // Some hosts pre-touch the document as an empty file; treat
            // it like a missing one.
            return Ok(None);
        }
        let metadata = serde_json::from_str(&raw)?;
        Ok(Some(metadata))
    }

    fn save(&self, metadata: &BinMetadata) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| StoreError::Replace("metadata path has no parent".into()))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, metadata)?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Replace(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), entries = metadata.len(), "metadata saved");
        Ok(())
    }
}
