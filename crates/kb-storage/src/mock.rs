//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind, is_hidden};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores file contents in memory. Directories are implied by file paths
/// and can also be added explicitly with [`MockStorage::with_dir`]. Use the
/// builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use kb_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("blog/posts/how-to/setup.md", "# Setup\n");
///
/// let dirs = storage.list_dirs(Path::new("blog/posts")).unwrap();
/// assert_eq!(dirs, vec!["how-to".to_owned()]);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content. Parent directories are created implicitly.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.files.insert(path, content.into());
        self
    }

    /// Add an (initially empty) directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }

    /// Add a file that is listed but fails to read.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.unreadable.insert(path);
        self
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn require_dir(&self, dir: &Path) -> Result<(), StorageError> {
        if dir.as_os_str().is_empty() || self.dirs.contains(dir) {
            Ok(())
        } else {
            Err(StorageError::not_found(dir).with_backend(BACKEND))
        }
    }

    /// Visible file names directly inside `dir`.
    fn child_files<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = &'a Path> + 'a {
        self.files
            .keys()
            .chain(self.unreadable.iter())
            .map(PathBuf::as_path)
            .filter(move |p| p.parent() == Some(dir))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Storage for MockStorage {
    fn list_dirs(&self, dir: &Path) -> Result<Vec<String>, StorageError> {
        self.require_dir(dir)?;
        Ok(self
            .dirs
            .iter()
            .filter(|p| p.parent() == Some(dir))
            .map(|p| file_name(p))
            .filter(|name| !is_hidden(name))
            .collect())
    }

    fn list_markdown(&self, dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
        self.require_dir(dir)?;
        Ok(self
            .child_files(dir)
            .filter(|p| {
                let name = file_name(p);
                !is_hidden(&name) && name.ends_with(".md")
            })
            .map(Path::to_path_buf)
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        if self.unreadable.contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path) || self.unreadable.contains(path)
    }
}
