use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used for keys created from calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest key in bytes. Keys become file names with a `.` prefix and a
/// `.png.tmp` suffix while being written, which must fit in 255 bytes.
pub const MAX_KEY_LEN: usize = 246;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
  #[error("page key is empty")]
  Empty,

  #[error("page key is longer than 246 bytes")]
  TooLong,

  #[error("page key {0:?} contains a path separator or NUL byte")]
  InvalidChar(String),

  #[error("page key {0:?} must not start with '.'")]
  Hidden(String),

  #[error("{0:?} is not a date (expected YYYY-MM-DD or \"today\")")]
  InvalidDate(String),
}

/// Identifies one stored page.
///
/// Keys are opaque strings, usually a calendar date (`2024-01-01`). They are
/// used directly as file names, so a key must be a single path component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageKey(String);

impl PageKey {
  pub fn new(key: impl Into<String>) -> Result<Self, KeyError> {
    let key = key.into();

    if key.is_empty() {
      return Err(KeyError::Empty);
    }
    if key.len() > MAX_KEY_LEN {
      return Err(KeyError::TooLong);
    }
    if key.contains(['/', '\\', '\0']) {
      return Err(KeyError::InvalidChar(key));
    }
    // Also rules out "." and "..".
    if key.starts_with('.') {
      return Err(KeyError::Hidden(key));
    }

    Ok(Self(key))
  }

  /// Key for a calendar date, formatted as `YYYY-MM-DD`.
  pub fn from_date(date: NaiveDate) -> Self {
    Self(date.format(DATE_FORMAT).to_string())
  }

  /// Key for the current local date.
  pub fn today() -> Self {
    Self::from_date(chrono::Local::now().date_naive())
  }

  /// Parse `YYYY-MM-DD` or `today` into a date key.
  pub fn parse_date(value: &str) -> Result<Self, KeyError> {
    if value.eq_ignore_ascii_case("today") {
      return Ok(Self::today());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
      .map(Self::from_date)
      .map_err(|_| KeyError::InvalidDate(value.to_string()))
  }

  /// The calendar date this key names, if it is a date key.
  pub fn date(&self) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&self.0, DATE_FORMAT).ok()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for PageKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for PageKey {
  type Err = KeyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for PageKey {
  type Error = KeyError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<PageKey> for String {
  fn from(key: PageKey) -> Self {
    key.0
  }
}

impl AsRef<str> for PageKey {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
