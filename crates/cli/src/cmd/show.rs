use anyhow::{Context, Result};

use daypage_lib::config::Settings;
use daypage_lib::{DebouncedImageStore, FsBackend, ManualTimer, PageKey};

use crate::output::{OutputFormat, format_bytes, print_info, print_json, print_stat, print_success};

pub fn cmd_show(settings: &Settings, key: &PageKey, output: OutputFormat) -> Result<()> {
  let backend = FsBackend::new(&settings.pages_dir);
  let path = backend.page_path(key);
  let store = DebouncedImageStore::new(backend, ManualTimer::new(), key.clone());

  let image = store
    .load(key)
    .with_context(|| format!("Failed to load page {}", key))?;

  if output.is_json() {
    let json = serde_json::json!({
      "key": key,
      "exists": image.is_some(),
      "path": path,
      "bytes": image.as_ref().map(|i| i.len()),
      "digest": image.as_ref().map(|i| i.digest()),
    });
    return print_json(&json);
  }

  let Some(image) = image else {
    print_info(&format!("No drawing for {}", key));
    return Ok(());
  };

  print_success(&format!("Page {}", key));
  if let Some(date) = key.date() {
    print_stat("Day", &date.format("%A, %B %-d %Y").to_string());
  }
  print_stat("Path", &path.display().to_string());
  print_stat("Size", &format_bytes(image.len() as u64));
  print_stat("Digest", &image.digest().to_string());

  Ok(())
}
