//! daypage-lib: debounced persistence for date-keyed drawings
//!
//! This crate provides the pieces behind a journaling canvas that saves itself:
//! - `PageKey` / `PageImage`: which page, and its PNG content
//! - `PageBackend`: where pages live (filesystem or memory)
//! - `DebouncedImageStore`: save-on-idle, flush-on-exit and erase
//! - `AutosaveSession`: the store driven by a tokio task

pub mod backend;
pub mod config;
pub mod consts;
pub mod page;
pub mod platform;
pub mod session;
pub mod store;
pub mod timer;
pub mod util;

pub use backend::{BackendError, FsBackend, MemoryBackend, PageBackend};
pub use page::{PageImage, PageKey};
pub use session::{AutosaveSession, SessionError};
pub use store::{DebouncedImageStore, PageEvent, PageObserver, SavedPage, StoreError};
pub use timer::{DeadlineTimer, IdleTimer, ManualTimer, TimerId};
