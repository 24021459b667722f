//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading posts from the local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind, is_hidden};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// All paths are resolved against `source_dir`, normally the host's
/// `docs_dir`.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use kb_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let posts = storage.list_markdown(Path::new("blog/posts/how-to"))?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a path doesn't escape the source directory.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve a storage-relative path to a filesystem path.
    fn resolve(&self, path: &Path) -> Result<PathBuf, StorageError> {
        Self::validate_path(path)?;
        Ok(self.source_dir.join(path))
    }

    /// Read visible directory entries as `(name, full path)` pairs.
    fn visible_entries(&self, dir: &Path) -> Result<Vec<(String, PathBuf)>, StorageError> {
        let full = self.resolve(dir)?;
        let entries = fs::read_dir(&full).map_err(|e| {
            StorageError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND)
        })?;

        Ok(entries
            .filter_map(|entry| {
                entry
                    .inspect_err(|e| {
                        tracing::debug!(dir = %full.display(), error = %e, "Skipping unreadable entry");
                    })
                    .ok()
            })
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                (!is_hidden(&name)).then(|| (name, entry.path()))
            })
            .collect())
    }
}

impl Storage for FsStorage {
    fn list_dirs(&self, dir: &Path) -> Result<Vec<String>, StorageError> {
        // `Path::is_dir` follows symlinks, so linked topic folders are listed too
        Ok(self
            .visible_entries(dir)?
            .into_iter()
            .filter(|(_, path)| path.is_dir())
            .map(|(name, _)| name)
            .collect())
    }

    fn list_markdown(&self, dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
        Ok(self
            .visible_entries(dir)?
            .into_iter()
            .filter(|(name, path)| name.ends_with(".md") && path.is_file())
            .map(|(name, _)| dir.join(name))
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|full| full.exists())
    }
}
