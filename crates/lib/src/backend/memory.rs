//! In-memory page backend.
//!
//! Meant for tests. Clones share the same storage, so a caller can hand one
//! clone to a store or session and inspect the other. Every write is kept in
//! an unbounded log, and failures can be injected to exercise retry paths.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{BackendError, PageBackend};
use crate::page::PageKey;

#[derive(Debug, Default)]
struct Inner {
  pages: BTreeMap<PageKey, Vec<u8>>,
  writes: Vec<(PageKey, Vec<u8>)>,
  fail_writes: bool,
  fail_deletes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Every successful `put`, oldest first.
  pub fn writes(&self) -> Vec<(PageKey, Vec<u8>)> {
    self.lock().writes.clone()
  }

  /// Number of successful `put` calls for `key`.
  pub fn write_count(&self, key: &PageKey) -> usize {
    self.lock().writes.iter().filter(|(k, _)| k == key).count()
  }

  /// Make subsequent `put` calls fail until reset.
  pub fn fail_writes(&self, fail: bool) {
    self.lock().fail_writes = fail;
  }

  /// Make subsequent `delete` calls fail until reset.
  pub fn fail_deletes(&self, fail: bool) {
    self.lock().fail_deletes = fail;
  }
}

impl PageBackend for MemoryBackend {
  fn put(&self, key: &PageKey, bytes: &[u8]) -> Result<(), BackendError> {
    let mut inner = self.lock();
    if inner.fail_writes {
      return Err(BackendError::Unavailable(format!("write to {} rejected", key)));
    }
    inner.pages.insert(key.clone(), bytes.to_vec());
    inner.writes.push((key.clone(), bytes.to_vec()));
    Ok(())
  }

  fn delete(&self, key: &PageKey) -> Result<bool, BackendError> {
    let mut inner = self.lock();
    if inner.fail_deletes {
      return Err(BackendError::Unavailable(format!("delete of {} rejected", key)));
    }
    Ok(inner.pages.remove(key).is_some())
  }

  fn get(&self, key: &PageKey) -> Result<Option<Vec<u8>>, BackendError> {
    Ok(self.lock().pages.get(key).cloned())
  }

  fn list(&self) -> Result<Vec<PageKey>, BackendError> {
    Ok(self.lock().pages.keys().cloned().collect())
  }
}
