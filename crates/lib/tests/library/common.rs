//! Shared fixtures for library integration tests.

use daypage_lib::page::image::PNG_SIGNATURE;
use daypage_lib::{FsBackend, PageImage, PageKey};
use tempfile::TempDir;

pub fn key(s: &str) -> PageKey {
  PageKey::new(s).unwrap()
}

/// A PNG-signed buffer whose payload identifies the stroke that produced it.
pub fn stroke(tag: &str) -> PageImage {
  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend_from_slice(tag.as_bytes());
  PageImage::from_png(bytes).unwrap()
}

pub fn temp_pages() -> (TempDir, FsBackend) {
  let temp = TempDir::new().unwrap();
  let backend = FsBackend::new(temp.path().join("pages"));
  (temp, backend)
}
