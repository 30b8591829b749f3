use anyhow::{Context, Result};

use daypage_lib::config::Settings;
use daypage_lib::{DebouncedImageStore, FsBackend, ManualTimer, PageKey};

use crate::output::{print_info, print_success};
use crate::prompts::confirm;

pub fn cmd_erase(settings: &Settings, key: PageKey, force: bool) -> Result<()> {
  if !confirm(&format!("Are you sure you want to clear page {}?", key), force)? {
    print_info("Erase cancelled");
    return Ok(());
  }

  let backend = FsBackend::new(&settings.pages_dir);
  let mut store = DebouncedImageStore::new(backend, ManualTimer::new(), key.clone());

  let existed = store
    .erase(&key)
    .with_context(|| format!("Failed to erase page {}", key))?;

  if existed {
    print_success(&format!("Cleared {}", key));
  } else {
    print_info(&format!("Nothing to clear for {}", key));
  }

  Ok(())
}
