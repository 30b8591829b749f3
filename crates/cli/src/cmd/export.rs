use std::path::Path;

use anyhow::{Context, Result, bail};

use daypage_lib::config::Settings;
use daypage_lib::{DebouncedImageStore, FsBackend, ManualTimer, PageKey};

use crate::output::{format_bytes, print_success};

pub fn cmd_export(settings: &Settings, key: &PageKey, file: &Path) -> Result<()> {
  let backend = FsBackend::new(&settings.pages_dir);
  let store = DebouncedImageStore::new(backend, ManualTimer::new(), key.clone());

  let Some(image) = store.load(key).with_context(|| format!("Failed to load page {}", key))? else {
    bail!("No drawing for {}", key);
  };

  std::fs::write(file, image.as_bytes()).with_context(|| format!("Failed to write {}", file.display()))?;

  print_success(&format!(
    "Exported {} to {} ({})",
    key,
    file.display(),
    format_bytes(image.len() as u64)
  ));
  Ok(())
}
