//! Filesystem page backend.
//!
//! # Storage Layout
//!
//! ```text
//! {pages_dir}/
//! ├── 2024-01-01.png      # One PNG per page key
//! ├── 2024-01-02.png
//! └── .2024-01-03.png.tmp # In-flight write, renamed into place
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{BackendError, PageBackend};
use crate::consts::PAGE_EXTENSION;
use crate::page::PageKey;

/// Stores each page as `<key>.png` in a single directory.
///
/// Writes go to a hidden temp file first and are renamed into place, so a
/// page on disk is always either the old or the new buffer.
#[derive(Debug, Clone)]
pub struct FsBackend {
  base_path: PathBuf,
}

impl FsBackend {
  /// Create a backend rooted at `base_path`. The directory is created on the
  /// first write.
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  pub fn base_path(&self) -> &Path {
    &self.base_path
  }

  /// Path of the file holding `key`.
  pub fn page_path(&self, key: &PageKey) -> PathBuf {
    self.base_path.join(format!("{}.{}", key, PAGE_EXTENSION))
  }

  fn temp_path(&self, key: &PageKey) -> PathBuf {
    self.base_path.join(format!(".{}.{}.tmp", key, PAGE_EXTENSION))
  }

  fn ensure_dir(&self) -> Result<(), BackendError> {
    fs::create_dir_all(&self.base_path).map_err(|source| BackendError::CreateDir {
      path: self.base_path.clone(),
      source,
    })
  }
}

impl PageBackend for FsBackend {
  fn put(&self, key: &PageKey, bytes: &[u8]) -> Result<(), BackendError> {
    self.ensure_dir()?;

    let path = self.page_path(key);
    let temp_path = self.temp_path(key);

    fs::write(&temp_path, bytes).map_err(|source| BackendError::Write {
      path: temp_path.clone(),
      source,
    })?;

    if let Err(source) = fs::rename(&temp_path, &path) {
      if let Err(e) = fs::remove_file(&temp_path) {
        warn!(path = ?temp_path, error = %e, "failed to clean up temp page");
      }
      return Err(BackendError::Write { path, source });
    }

    debug!(path = ?path, size = bytes.len(), "page written");
    Ok(())
  }

  fn delete(&self, key: &PageKey) -> Result<bool, BackendError> {
    let path = self.page_path(key);

    match fs::remove_file(&path) {
      Ok(()) => {
        debug!(path = ?path, "page removed");
        Ok(true)
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
      Err(source) => Err(BackendError::Delete { path, source }),
    }
  }

  fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, BackendError> {
    let path = self.page_path(key);

    match fs::read(&path) {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(source) => Err(BackendError::Read { path, source }),
    }
  }

  fn list(&self) -> Result<Vec<PageKey>, BackendError> {
    let list_err = |source| BackendError::List {
      path: self.base_path.clone(),
      source,
    };

    let entries = match fs::read_dir(&self.base_path) {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(list_err(e)),
    };

    let mut keys = Vec::new();
    for entry in entries {
      let path = entry.map_err(list_err)?.path();
      if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PAGE_EXTENSION) {
        continue;
      }
      let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        continue;
      };
      match PageKey::new(stem) {
        Ok(key) => keys.push(key),
        Err(e) => debug!(path = ?path, error = %e, "skipping file that is not a page"),
      }
    }

    keys.sort();
    Ok(keys)
  }
}
