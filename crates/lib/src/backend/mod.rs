//! Persistence boundary for pages.
//!
//! A backend stores whole page buffers addressed by `PageKey`. Every `put`
//! overwrites the previous buffer; there is no versioning.

pub mod fs;
pub mod memory;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::page::PageKey;

pub use fs::FsBackend;
pub use memory::MemoryBackend;

#[derive(Debug, Error)]
pub enum BackendError {
  #[error("failed to create pages directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write page {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read page {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to delete page {path}: {source}")]
  Delete {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to list pages in {path}: {source}")]
  List {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("backend unavailable: {0}")]
  Unavailable(String),
}

/// Storage for page buffers.
pub trait PageBackend {
  /// Store `bytes` under `key`, replacing any previous buffer.
  fn put(&self, key: &PageKey, bytes: &[u8]) -> Result<(), BackendError>;

  /// Remove the buffer stored under `key`.
  ///
  /// Returns `Ok(false)` if nothing was stored.
  fn delete(&self, key: &PageKey) -> Result<bool, BackendError>;

  /// Read the buffer stored under `key`.
  fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, BackendError>;

  /// All stored keys in ascending order.
  fn list(&self) -> Result<Vec<PageKey>, BackendError>;
}
