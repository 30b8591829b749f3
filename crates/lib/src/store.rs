//! Debounced persistence of the page being drawn.
//!
//! `DebouncedImageStore` sits between a drawing surface and a `PageBackend`.
//! The surface reports stroke boundaries with `begin_edit` / `end_edit`; the
//! store keeps the latest completed image and writes it once the surface has
//! been idle for the idle window, or immediately on `flush`.
//!
//! # States
//!
//! ```text
//!            end_edit                 idle elapsed / flush
//!   Clean ────────────► Dirty-Pending ─────────────────────► Clean
//!                          │   ▲
//!               begin_edit │   │ end_edit
//!                          ▼   │
//!                     Dirty (timer canceled) ── flush ──► Clean
//!
//!   erase(current key) from any state ──► Erased (clean until next end_edit)
//! ```
//!
//! Only one save can be pending. A new `end_edit` replaces the held image and
//! its timer, so a burst of strokes produces a single write of the last image.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, PageBackend};
use crate::consts::DEFAULT_IDLE_WINDOW;
use crate::page::{ImageError, PageImage, PageKey};
use crate::timer::{IdleTimer, ManualTimer, TimerId};
use crate::util::hash::ContentHash;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error(transparent)]
  Backend(#[from] BackendError),

  #[error("stored page {key} is corrupt: {source}")]
  CorruptPage {
    key: PageKey,
    #[source]
    source: ImageError,
  },
}

/// Change notification emitted after every save or erase attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
  Saved {
    key: PageKey,
    bytes: usize,
    digest: ContentHash,
  },
  Erased {
    key: PageKey,
    existed: bool,
  },
  SaveFailed {
    key: PageKey,
    error: String,
  },
  EraseFailed {
    key: PageKey,
    error: String,
  },
}

impl PageEvent {
  pub fn key(&self) -> &PageKey {
    match self {
      PageEvent::Saved { key, .. }
      | PageEvent::Erased { key, .. }
      | PageEvent::SaveFailed { key, .. }
      | PageEvent::EraseFailed { key, .. } => key,
    }
  }

  pub fn is_failure(&self) -> bool {
    matches!(self, PageEvent::SaveFailed { .. } | PageEvent::EraseFailed { .. })
  }
}

/// Receives `PageEvent`s, e.g. to refresh a calendar's "has drawing" marks.
pub trait PageObserver {
  fn on_page_event(&mut self, event: &PageEvent);
}

impl<F: FnMut(&PageEvent)> PageObserver for F {
  fn on_page_event(&mut self, event: &PageEvent) {
    self(event)
  }
}

/// A page that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedPage {
  pub key: PageKey,
  pub bytes: usize,
  pub digest: ContentHash,
}

struct PendingSave {
  image: PageImage,
  /// `None` once the timer was canceled by `begin_edit` or has fired.
  timer: Option<TimerId>,
}

pub struct DebouncedImageStore<B, T> {
  backend: B,
  timer: T,
  key: PageKey,
  idle_window: Duration,
  pending: Option<PendingSave>,
  observers: Vec<Box<dyn PageObserver + Send>>,
}

impl<B: PageBackend, T: IdleTimer> DebouncedImageStore<B, T> {
  /// Create a store editing `key`, saving after the default idle window.
  pub fn new(backend: B, timer: T, key: PageKey) -> Self {
    Self {
      backend,
      timer,
      key,
      idle_window: DEFAULT_IDLE_WINDOW,
      pending: None,
      observers: Vec::new(),
    }
  }

  pub fn with_idle_window(mut self, idle_window: Duration) -> Self {
    self.idle_window = idle_window;
    self
  }

  pub fn subscribe(&mut self, observer: impl PageObserver + Send + 'static) {
    self.observers.push(Box::new(observer));
  }

  /// Key of the page currently being edited.
  pub fn key(&self) -> &PageKey {
    &self.key
  }

  pub fn idle_window(&self) -> Duration {
    self.idle_window
  }

  /// Whether a completed edit has not been written yet.
  pub fn is_dirty(&self) -> bool {
    self.pending.is_some()
  }

  /// Whether the held image is waiting on an idle timer.
  pub fn has_scheduled_save(&self) -> bool {
    self.pending.as_ref().is_some_and(|p| p.timer.is_some())
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  pub fn timer(&self) -> &T {
    &self.timer
  }

  pub fn timer_mut(&mut self) -> &mut T {
    &mut self.timer
  }

  /// A stroke is starting. Cancels the idle save so it cannot fire mid-stroke;
  /// the last completed image stays held.
  pub fn begin_edit(&mut self) {
    if let Some(id) = self.pending.as_mut().and_then(|p| p.timer.take()) {
      self.timer.cancel(id);
      debug!(key = %self.key, timer = %id, "idle save canceled by new stroke");
    }
  }

  /// A stroke completed with `image` as the resulting page. Replaces any held
  /// image and restarts the idle window.
  pub fn end_edit(&mut self, image: PageImage) -> TimerId {
    if let Some(id) = self.pending.take().and_then(|p| p.timer) {
      self.timer.cancel(id);
    }

    let id = self.timer.schedule(self.idle_window);
    debug!(
      key = %self.key,
      timer = %id,
      delay_ms = self.idle_window.as_millis() as u64,
      "idle save scheduled"
    );
    self.pending = Some(PendingSave {
      image,
      timer: Some(id),
    });
    id
  }

  /// Called by the timer driver when `id` came due.
  ///
  /// Timers that were canceled or replaced in the meantime are ignored. On a
  /// failed write the pending save is left as it was, so firing `id` again,
  /// a later `end_edit` or a `flush` retries it.
  pub fn on_idle_elapsed(&mut self, id: TimerId) -> Result<Option<SavedPage>, StoreError> {
    let image = match self.pending.as_mut() {
      Some(pending) if pending.timer == Some(id) => {
        pending.timer = None;
        pending.image.clone()
      }
      _ => {
        debug!(key = %self.key, timer = %id, "ignoring stale idle timer");
        return Ok(None);
      }
    };

    match self.save(&image) {
      Ok(saved) => {
        self.pending = None;
        Ok(Some(saved))
      }
      Err(e) => {
        if let Some(pending) = self.pending.as_mut() {
          pending.timer = Some(id);
        }
        Err(e)
      }
    }
  }

  /// Write the held image now, if there is one. Used when the editing surface
  /// goes away.
  pub fn flush(&mut self) -> Result<Option<SavedPage>, StoreError> {
    let Some(image) = self.pending.as_ref().map(|p| p.image.clone()) else {
      return Ok(None);
    };

    let saved = self.save(&image)?;
    if let Some(id) = self.pending.take().and_then(|p| p.timer) {
      self.timer.cancel(id);
    }
    Ok(Some(saved))
  }

  /// Delete the page stored under `key`.
  ///
  /// Erasing the current page also drops the held image, so a trailing idle
  /// save cannot bring it back. Erasing any other key leaves the current
  /// page's pending save alone. Returns whether a page existed.
  pub fn erase(&mut self, key: &PageKey) -> Result<bool, StoreError> {
    let existed = match self.backend.delete(key) {
      Ok(existed) => existed,
      Err(e) => {
        warn!(key = %key, error = %e, "failed to erase page");
        self.notify(PageEvent::EraseFailed {
          key: key.clone(),
          error: e.to_string(),
        });
        return Err(e.into());
      }
    };

    if *key == self.key {
      if let Some(pending) = self.pending.take() {
        if let Some(id) = pending.timer {
          self.timer.cancel(id);
        }
        debug!(key = %key, "discarded unsaved edit of erased page");
      }
    }

    info!(key = %key, existed, "page erased");
    self.notify(PageEvent::Erased {
      key: key.clone(),
      existed,
    });
    Ok(existed)
  }

  /// Read the page stored under `key`.
  pub fn load(&self, key: &PageKey) -> Result<Option<PageImage>, StoreError> {
    let Some(bytes) = self.backend.get(key)? else {
      return Ok(None);
    };

    PageImage::from_png(bytes).map(Some).map_err(|source| StoreError::CorruptPage {
      key: key.clone(),
      source,
    })
  }

  /// Switch to editing `key`, flushing the current page first.
  ///
  /// If the flush fails the store keeps editing the current page.
  pub fn select(&mut self, key: PageKey) -> Result<Option<PageImage>, StoreError> {
    if key != self.key {
      self.flush()?;
      debug!(from = %self.key, to = %key, "switched page");
      self.key = key;
    }
    self.load(&self.key)
  }

  fn save(&mut self, image: &PageImage) -> Result<SavedPage, StoreError> {
    let key = self.key.clone();

    if let Err(e) = self.backend.put(&key, image.as_bytes()) {
      warn!(key = %key, error = %e, "failed to save page");
      self.notify(PageEvent::SaveFailed {
        key,
        error: e.to_string(),
      });
      return Err(e.into());
    }

    let saved = SavedPage {
      key,
      bytes: image.len(),
      digest: image.digest(),
    };
    info!(key = %saved.key, bytes = saved.bytes, digest = %saved.digest.short(), "page saved");
    self.notify(PageEvent::Saved {
      key: saved.key.clone(),
      bytes: saved.bytes,
      digest: saved.digest.clone(),
    });
    Ok(saved)
  }

  fn notify(&mut self, event: PageEvent) {
    for observer in &mut self.observers {
      observer.on_page_event(&event);
    }
  }
}

impl<B: PageBackend> DebouncedImageStore<B, ManualTimer> {
  /// Move the virtual clock and run every idle save that came due.
  pub fn advance(&mut self, by: Duration) -> Result<Option<SavedPage>, StoreError> {
    let mut saved = None;
    for id in self.timer.advance(by) {
      if let Some(page) = self.on_idle_elapsed(id)? {
        saved = Some(page);
      }
    }
    Ok(saved)
  }
}
