use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::util::hash::{ContentHash, hash_bytes};

/// Every PNG stream starts with these eight bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
  #[error("image data is not a PNG ({len} bytes, missing PNG signature)")]
  NotPng { len: usize },
}

/// An encoded page drawing.
///
/// Immutable once created: a new stroke on the drawing surface produces a new
/// `PageImage`. Cloning shares the underlying buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PageImage {
  bytes: Arc<[u8]>,
}

impl PageImage {
  /// Wrap PNG-encoded bytes, checking the PNG signature.
  pub fn from_png(bytes: impl Into<Vec<u8>>) -> Result<Self, ImageError> {
    let bytes = bytes.into();
    if !bytes.starts_with(&PNG_SIGNATURE) {
      return Err(ImageError::NotPng { len: bytes.len() });
    }
    Ok(Self { bytes: bytes.into() })
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  pub fn digest(&self) -> ContentHash {
    hash_bytes(&self.bytes)
  }
}

impl fmt::Debug for PageImage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PageImage")
      .field("len", &self.bytes.len())
      .field("digest", &self.digest().short())
      .finish()
  }
}

impl AsRef<[u8]> for PageImage {
  fn as_ref(&self) -> &[u8] {
    &self.bytes
  }
}
