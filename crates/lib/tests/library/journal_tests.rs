//! A day of journaling against the filesystem backend, driven by a manual clock.

use std::time::Duration;

use daypage_lib::{DebouncedImageStore, ManualTimer, PageBackend};

use super::common::{key, stroke, temp_pages};

const IDLE: Duration = Duration::from_secs(3);

#[test]
fn strokes_are_saved_once_the_page_is_idle() {
  let (_temp, backend) = temp_pages();
  let mut store = DebouncedImageStore::new(backend.clone(), ManualTimer::new(), key("2024-01-01"));

  store.begin_edit();
  store.end_edit(stroke("line"));
  store.begin_edit();
  store.end_edit(stroke("line+circle"));
  store.advance(IDLE).unwrap();

  let on_disk = std::fs::read(backend.page_path(&key("2024-01-01"))).unwrap();
  assert_eq!(on_disk, stroke("line+circle").as_bytes());
}

#[test]
fn leaving_the_page_flushes_it() {
  let (_temp, backend) = temp_pages();
  let mut store = DebouncedImageStore::new(backend.clone(), ManualTimer::new(), key("2024-01-01"));

  store.end_edit(stroke("quick note"));
  store.advance(Duration::from_secs(1)).unwrap();
  assert!(backend.get(&key("2024-01-01")).unwrap().is_none());

  store.flush().unwrap();
  assert_eq!(
    backend.get(&key("2024-01-01")).unwrap().unwrap(),
    stroke("quick note").as_bytes()
  );
}

#[test]
fn clearing_a_page_removes_it_from_the_calendar() {
  let (_temp, backend) = temp_pages();
  let mut store = DebouncedImageStore::new(backend.clone(), ManualTimer::new(), key("2024-01-01"));

  store.end_edit(stroke("monday"));
  store.flush().unwrap();
  store.select(key("2024-01-02")).unwrap();
  store.end_edit(stroke("tuesday"));
  store.flush().unwrap();
  assert_eq!(backend.list().unwrap(), vec![key("2024-01-01"), key("2024-01-02")]);

  store.end_edit(stroke("tuesday, more"));
  assert!(store.erase(&key("2024-01-02")).unwrap());
  store.advance(IDLE * 2).unwrap();

  assert_eq!(backend.list().unwrap(), vec![key("2024-01-01")]);
  assert!(store.load(&key("2024-01-02")).unwrap().is_none());
}

#[test]
fn reopening_a_day_loads_its_drawing() {
  let (_temp, backend) = temp_pages();
  {
    let mut store = DebouncedImageStore::new(backend.clone(), ManualTimer::new(), key("2024-01-01"));
    store.end_edit(stroke("kept"));
    store.flush().unwrap();
  }

  let mut store = DebouncedImageStore::new(backend, ManualTimer::new(), key("2023-12-31"));
  let loaded = store.select(key("2024-01-01")).unwrap();
  assert_eq!(loaded, Some(stroke("kept")));
}
