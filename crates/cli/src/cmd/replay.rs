//! Replay a drawing session from PNG frames.
//!
//! Each frame is one finished stroke. Frames closer together than the idle
//! window collapse into a single save; the session is shut down at the end,
//! which flushes whatever is still held.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use daypage_lib::config::Settings;
use daypage_lib::{AutosaveSession, DeadlineTimer, DebouncedImageStore, FsBackend, PageEvent, PageImage, PageKey};

use crate::output::{describe_event, format_duration, print_info, print_stat, print_success, print_warning};

pub fn cmd_replay(settings: &Settings, key: PageKey, frames: &[PathBuf], gap: Duration) -> Result<()> {
  let images = frames
    .iter()
    .map(|path| {
      let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
      PageImage::from_png(bytes).with_context(|| format!("Cannot replay {}", path.display()))
    })
    .collect::<Result<Vec<_>>>()?;

  print_info(&format!(
    "Replaying {} stroke(s) on {} (gap {}, idle window {})",
    images.len(),
    key,
    format_duration(gap),
    format_duration(settings.idle_window)
  ));

  let start = Instant::now();
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let events = rt.block_on(replay(settings, key, images, gap))?;

  let mut saves = 0;
  for event in &events {
    if event.is_failure() {
      print_warning(&describe_event(event));
    } else {
      println!("  {}", describe_event(event));
    }
    if matches!(event, PageEvent::Saved { .. }) {
      saves += 1;
    }
  }

  println!();
  print_success("Replay complete");
  print_stat("Strokes", &frames.len().to_string());
  print_stat("Saves", &saves.to_string());
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}

async fn replay(settings: &Settings, key: PageKey, images: Vec<PageImage>, gap: Duration) -> Result<Vec<PageEvent>> {
  let backend = FsBackend::new(&settings.pages_dir);
  let store = DebouncedImageStore::new(backend, DeadlineTimer::new(), key).with_idle_window(settings.idle_window);
  let (session, mut events) = AutosaveSession::spawn(store);

  for (index, image) in images.into_iter().enumerate() {
    debug!(stroke = index + 1, "replaying stroke");
    session.begin_edit()?;
    session.end_edit(image)?;
    tokio::time::sleep(gap).await;
  }

  session.shutdown().await.context("Failed to save page")?;

  // The session task has stopped, so the event stream ends once drained.
  let mut seen = Vec::new();
  while let Some(event) = events.recv().await {
    seen.push(event);
  }
  Ok(seen)
}
