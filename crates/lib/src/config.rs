//! Runtime settings resolved from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::consts::{DEFAULT_IDLE_WINDOW, IDLE_WINDOW_ENV, PAGES_DIR, PAGES_DIR_ENV};
use crate::platform::paths::data_dir;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid DAYPAGE_IDLE_WINDOW value {value:?}: {message}")]
  IdleWindow { value: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  /// Directory holding one PNG per page.
  pub pages_dir: PathBuf,
  /// Idle period before a completed edit is saved.
  pub idle_window: Duration,
}

impl Settings {
  /// Resolve settings from `DAYPAGE_PAGES_DIR` and `DAYPAGE_IDLE_WINDOW`,
  /// falling back to defaults.
  pub fn from_env() -> Result<Self, ConfigError> {
    let idle_window = match std::env::var(IDLE_WINDOW_ENV) {
      Ok(value) => parse_idle_window(&value)?,
      Err(_) => DEFAULT_IDLE_WINDOW,
    };

    Ok(Self {
      pages_dir: Self::pages_dir(),
      idle_window,
    })
  }

  pub fn pages_dir() -> PathBuf {
    if let Ok(path) = std::env::var(PAGES_DIR_ENV) {
      return PathBuf::from(path);
    }

    Self::default_pages_dir()
  }

  pub fn default_pages_dir() -> PathBuf {
    data_dir().join(PAGES_DIR)
  }
}

/// Parse a humantime duration such as `3s` or `500ms`. Zero is rejected.
pub fn parse_idle_window(value: &str) -> Result<Duration, ConfigError> {
  let invalid = |message: String| ConfigError::IdleWindow {
    value: value.to_string(),
    message,
  };

  let duration = humantime::parse_duration(value.trim()).map_err(|e| invalid(e.to_string()))?;
  if duration.is_zero() {
    return Err(invalid("idle window must be greater than zero".to_string()));
  }
  Ok(duration)
}
