use predicates::prelude::*;

use super::common::{TestEnv, png_bytes};

#[test]
fn burst_of_strokes_saves_once() {
  let env = TestEnv::empty();
  let frames: Vec<_> = ["a", "ab", "abc"]
    .iter()
    .map(|tag| env.write_file(&format!("{}.png", tag), &png_bytes(tag)))
    .collect();

  env
    .daypage_cmd()
    .args(["replay", "2024-01-01", "--gap", "0ms", "--idle", "10s"])
    .args(&frames)
    .assert()
    .success()
    .stdout(predicate::str::contains("Saves: 1"));

  assert_eq!(std::fs::read(env.page_path("2024-01-01")).unwrap(), png_bytes("abc"));
}

#[test]
fn spaced_strokes_save_each_time() {
  let env = TestEnv::empty();
  let frames: Vec<_> = ["a", "ab"]
    .iter()
    .map(|tag| env.write_file(&format!("{}.png", tag), &png_bytes(tag)))
    .collect();

  env
    .daypage_cmd()
    .args(["replay", "2024-01-01", "--gap", "300ms", "--idle", "10ms"])
    .args(&frames)
    .assert()
    .success()
    .stdout(predicate::str::contains("Saves: 2"));

  assert_eq!(std::fs::read(env.page_path("2024-01-01")).unwrap(), png_bytes("ab"));
}

#[test]
fn replay_rejects_zero_idle_window() {
  let env = TestEnv::empty();
  let frame = env.write_file("a.png", &png_bytes("a"));

  env
    .daypage_cmd()
    .args(["replay", "2024-01-01", "--idle", "0s"])
    .arg(&frame)
    .assert()
    .failure();
}
