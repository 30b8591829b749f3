//! The tokio autosave session writing real files.

use std::time::Duration;

use daypage_lib::{AutosaveSession, DeadlineTimer, DebouncedImageStore, PageBackend, PageEvent};

use super::common::{key, stroke, temp_pages};

#[tokio::test(start_paused = true)]
async fn session_saves_last_stroke_of_a_burst() {
  let (_temp, backend) = temp_pages();
  let store = DebouncedImageStore::new(backend.clone(), DeadlineTimer::new(), key("2024-01-01"));
  let (session, mut events) = AutosaveSession::spawn(store);

  for tag in ["a", "ab", "abc"] {
    session.begin_edit().unwrap();
    session.end_edit(stroke(tag)).unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
  }

  let event = events.recv().await.unwrap();
  match event {
    PageEvent::Saved { key: saved, digest, .. } => {
      assert_eq!(saved, key("2024-01-01"));
      assert_eq!(digest, stroke("abc").digest());
    }
    other => panic!("unexpected event: {other:?}"),
  }

  assert!(session.shutdown().await.unwrap().is_none());
  assert_eq!(backend.list().unwrap(), vec![key("2024-01-01")]);
}

#[tokio::test(start_paused = true)]
async fn session_with_short_idle_window() {
  let (_temp, backend) = temp_pages();
  let store = DebouncedImageStore::new(backend.clone(), DeadlineTimer::new(), key("2024-01-01"))
    .with_idle_window(Duration::from_millis(100));
  let (session, _events) = AutosaveSession::spawn(store);

  session.end_edit(stroke("fast")).unwrap();
  tokio::time::sleep(Duration::from_millis(150)).await;

  assert!(backend.get(&key("2024-01-01")).unwrap().is_some());
  assert!(session.flush().await.unwrap().is_none());
}
