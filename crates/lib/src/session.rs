//! Async autosave session.
//!
//! `AutosaveSession::spawn` moves a store into a tokio task that owns it for
//! the rest of its life. Edits and requests arrive over a channel and idle
//! deadlines are awaited in the same loop, so strokes and saves never run
//! concurrently and the store needs no locking.
//!
//! When the last handle is dropped the task flushes the held image and exits.

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::backend::PageBackend;
use crate::page::{PageImage, PageKey};
use crate::store::{DebouncedImageStore, PageEvent, SavedPage, StoreError};
use crate::timer::DeadlineTimer;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
  #[error(transparent)]
  Store(#[from] StoreError),

  #[error("autosave session has stopped")]
  Closed,
}

type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

enum Command {
  BeginEdit,
  EndEdit(PageImage),
  Flush(Reply<Option<SavedPage>>),
  Erase(PageKey, Reply<bool>),
  Load(PageKey, Reply<Option<PageImage>>),
  Select(PageKey, Reply<Option<PageImage>>),
  Shutdown(Reply<Option<SavedPage>>),
}

/// Handle to a running autosave task. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AutosaveSession {
  tx: mpsc::UnboundedSender<Command>,
}

impl AutosaveSession {
  /// Start the autosave task on the current tokio runtime.
  ///
  /// Returns the handle and a stream of every save/erase event.
  pub fn spawn<B>(mut store: DebouncedImageStore<B, DeadlineTimer>) -> (Self, mpsc::UnboundedReceiver<PageEvent>)
  where
    B: PageBackend + Send + 'static,
  {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    store.subscribe(move |event: &PageEvent| {
      // Nobody listening is fine.
      let _ = event_tx.send(event.clone());
    });

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run(store, rx));

    (Self { tx }, event_rx)
  }

  pub fn begin_edit(&self) -> Result<(), SessionError> {
    self.send(Command::BeginEdit)
  }

  pub fn end_edit(&self, image: PageImage) -> Result<(), SessionError> {
    self.send(Command::EndEdit(image))
  }

  pub async fn flush(&self) -> Result<Option<SavedPage>, SessionError> {
    self.request(Command::Flush).await
  }

  pub async fn erase(&self, key: PageKey) -> Result<bool, SessionError> {
    self.request(|reply| Command::Erase(key, reply)).await
  }

  pub async fn load(&self, key: PageKey) -> Result<Option<PageImage>, SessionError> {
    self.request(|reply| Command::Load(key, reply)).await
  }

  pub async fn select(&self, key: PageKey) -> Result<Option<PageImage>, SessionError> {
    self.request(|reply| Command::Select(key, reply)).await
  }

  /// Flush and stop the task. Other handles see `SessionError::Closed`
  /// afterwards.
  pub async fn shutdown(self) -> Result<Option<SavedPage>, SessionError> {
    self.request(Command::Shutdown).await
  }

  fn send(&self, command: Command) -> Result<(), SessionError> {
    self.tx.send(command).map_err(|_| SessionError::Closed)
  }

  async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T, SessionError> {
    let (reply_tx, reply_rx) = oneshot::channel();
    self.send(make(reply_tx))?;
    let result = reply_rx.await.map_err(|_| SessionError::Closed)?;
    Ok(result?)
  }
}

async fn run<B: PageBackend>(mut store: DebouncedImageStore<B, DeadlineTimer>, mut rx: mpsc::UnboundedReceiver<Command>) {
  debug!(key = %store.key(), "autosave session started");

  loop {
    let deadline = store.timer().next_deadline();

    tokio::select! {
      command = rx.recv() => match command {
        Some(command) => {
          if !handle(&mut store, command) {
            break;
          }
        }
        None => {
          if let Err(e) = store.flush() {
            warn!(key = %store.key(), error = %e, "final flush failed, unsaved edit lost");
          }
          break;
        }
      },
      _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
        if let Some(id) = store.timer_mut().take_due(Instant::now()) {
          if let Err(e) = store.on_idle_elapsed(id) {
            debug!(error = %e, "idle save failed, edit held for retry");
          }
        }
      }
    }
  }

  debug!(key = %store.key(), "autosave session stopped");
}

/// Apply one command. Returns `false` once the session should stop.
fn handle<B: PageBackend>(store: &mut DebouncedImageStore<B, DeadlineTimer>, command: Command) -> bool {
  match command {
    Command::BeginEdit => store.begin_edit(),
    Command::EndEdit(image) => {
      store.end_edit(image);
    }
    Command::Flush(reply) => {
      let _ = reply.send(store.flush());
    }
    Command::Erase(key, reply) => {
      let _ = reply.send(store.erase(&key));
    }
    Command::Load(key, reply) => {
      let _ = reply.send(store.load(&key));
    }
    Command::Select(key, reply) => {
      let _ = reply.send(store.select(key));
    }
    Command::Shutdown(reply) => {
      let _ = reply.send(store.flush());
      return false;
    }
  }
  true
}
