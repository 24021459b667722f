//! Storage abstraction for the knowledge base posts tree.
//!
//! This crate provides a [`Storage`] trait for the two things the navigation
//! builder needs from the documentation source: listing directories and
//! markdown files, and reading file contents. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between navigation logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list_dirs()`, `list_markdown()`, `read()`, and `exists()` methods
//! - [`FsStorage`] implementation rooted at the host's `docs_dir`
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use kb_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for folder in storage.list_dirs(Path::new("blog/posts"))? {
//!     println!("{folder}");
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind, is_hidden};
