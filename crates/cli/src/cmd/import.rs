//! Store a PNG for a day.
//!
//! The file goes through the store like a finished stroke followed by the
//! canvas closing: `end_edit` then `flush`.

use std::path::Path;

use anyhow::{Context, Result};

use daypage_lib::config::Settings;
use daypage_lib::{DebouncedImageStore, FsBackend, ManualTimer, PageImage, PageKey};

use crate::output::{format_bytes, print_info, print_success};

pub fn cmd_import(settings: &Settings, key: PageKey, file: &Path) -> Result<()> {
  let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
  let image = PageImage::from_png(bytes).with_context(|| format!("Cannot import {}", file.display()))?;

  let backend = FsBackend::new(&settings.pages_dir);
  let mut store = DebouncedImageStore::new(backend, ManualTimer::new(), key);

  store.begin_edit();
  store.end_edit(image);

  match store.flush().context("Failed to save page")? {
    Some(saved) => print_success(&format!(
      "Saved {} ({}, {})",
      saved.key,
      format_bytes(saved.bytes as u64),
      saved.digest.short()
    )),
    None => print_info("Nothing to save"),
  }

  Ok(())
}
