//! Default `std::fs`-backed collaborator implementations

use skipbin_domain::{DirectoryLister, FileDeleter, FileMover, ListedFile, RetentionPolicy};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Filesystem collaborators backed by `std::fs`
///
/// Moves prefer `rename` and fall back to copy-plus-delete when the rename
/// fails (typically a cross-device move). Failures are logged at `warn` and
/// reported as `false` per the collaborator contract; the engine skips the
/// affected file and continues its batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileOps;

impl StdFileOps {
    /// Create the base and trash directories for a policy
    ///
    /// Directory creation is an explicit step the host runs once before
    /// constructing the engine; the path accessors on the policy stay
    /// side-effect free.
    pub fn ensure_dirs(policy: &RetentionPolicy) -> io::Result<()> {
        fs::create_dir_all(policy.files_dir())
    }

    fn copy_recursively(source: &Path, destination: &Path) -> io::Result<()> {
        if source.is_dir() {
            fs::create_dir_all(destination)?;
            for child in fs::read_dir(source)? {
                let child = child?;
                Self::copy_recursively(&child.path(), &destination.join(child.file_name()))?;
            }
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, destination)?;
        }
        Ok(())
    }

    fn move_by_copy(source: &Path, destination: &Path) -> io::Result<()> {
        Self::copy_recursively(source, destination)?;
        if source.is_dir() {
            fs::remove_dir_all(source)
        } else {
            fs::remove_file(source)
        }
    }

    /// Cumulative size of a path in bytes (recursive for directories)
    pub fn size_of(path: &Path) -> u64 {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter_map(|e| e.metadata().ok())
            .filter(|m| m.is_file())
            .map(|m| m.len())
            .sum()
    }
}

impl FileMover for StdFileOps {
    fn move_file(&self, source: &Path, destination: &Path) -> bool {
        if let Some(parent) = destination.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(dest = %destination.display(), error = %e, "cannot create destination directory");
                return false;
            }
        }
        match fs::rename(source, destination) {
            Ok(()) => true,
            Err(_) => match Self::move_by_copy(source, destination) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(
                        source = %source.display(),
                        dest = %destination.display(),
                        error = %e,
                        "move failed"
                    );
                    false
                }
            },
        }
    }
}

impl FileDeleter for StdFileOps {
    fn delete_file(&self, path: &Path) -> bool {
        let result = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "delete failed");
                false
            }
        }
    }
}

impl DirectoryLister for StdFileOps {
    fn list_files(&self, dir: &Path) -> Vec<ListedFile> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot list trash directory");
                return Vec::new();
            }
        };

        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let path = e.path();
                let is_directory = path.is_dir();
                let size_bytes = if is_directory {
                    Self::size_of(&path)
                } else {
                    e.metadata().ok().map(|m| m.len())?
                };
                Some(ListedFile {
                    name: e.file_name().to_string_lossy().into_owned(),
                    is_directory,
                    path,
                    size_bytes,
                })
            })
            .collect()
    }
}
