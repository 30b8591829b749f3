//! List days that have a drawing, like the calendar's marked dates.

use anyhow::{Context, Result};
use serde::Serialize;

use daypage_lib::config::Settings;
use daypage_lib::{FsBackend, PageBackend, PageKey};

use crate::output::{OutputFormat, format_bytes, print_info, print_json, print_stat};

#[derive(Debug, Serialize)]
struct PageEntry {
  key: PageKey,
  bytes: u64,
}

pub fn cmd_list(settings: &Settings, output: OutputFormat) -> Result<()> {
  let backend = FsBackend::new(&settings.pages_dir);
  let keys = backend.list().context("Failed to list pages")?;

  let entries = keys
    .into_iter()
    .map(|key| {
      let path = backend.page_path(&key);
      let bytes = std::fs::metadata(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
      Ok(PageEntry { key, bytes })
    })
    .collect::<Result<Vec<_>>>()?;

  if output.is_json() {
    return print_json(&entries);
  }

  if entries.is_empty() {
    print_info(&format!("No pages in {}", settings.pages_dir.display()));
    return Ok(());
  }

  print_info(&format!("{} page(s) in {}", entries.len(), settings.pages_dir.display()));
  for entry in &entries {
    print_stat(entry.key.as_str(), &format_bytes(entry.bytes));
  }

  Ok(())
}
