use predicates::prelude::*;

use super::common::{TestEnv, png_bytes};

#[test]
fn list_with_no_pages() {
  let env = TestEnv::empty();

  env
    .daypage_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("No pages"));
}

#[test]
fn list_shows_stored_days_in_order() {
  let env = TestEnv::empty();
  env.seed_page("2024-01-02", &png_bytes("b"));
  env.seed_page("2024-01-01", &png_bytes("a"));

  let output = env.daypage_cmd().arg("list").assert().success().get_output().stdout.clone();
  let stdout = String::from_utf8(output).unwrap();

  assert!(stdout.contains("2 page(s)"));
  let first = stdout.find("2024-01-01").unwrap();
  let second = stdout.find("2024-01-02").unwrap();
  assert!(first < second);
}

#[test]
fn list_json_output_is_valid() {
  let env = TestEnv::empty();
  env.seed_page("2024-01-01", &png_bytes("a"));

  let output = env
    .daypage_cmd()
    .args(["list", "-o", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(json[0]["key"], "2024-01-01");
  assert_eq!(json[0]["bytes"], png_bytes("a").len());
}

#[test]
fn import_then_export_roundtrip() {
  let env = TestEnv::empty();
  let source = env.write_file("drawing.png", &png_bytes("stroke"));
  let dest = env.temp.path().join("out.png");

  env
    .daypage_cmd()
    .arg("import")
    .arg("2024-01-01")
    .arg(&source)
    .assert()
    .success()
    .stdout(predicate::str::contains("Saved 2024-01-01"));

  assert_eq!(std::fs::read(env.page_path("2024-01-01")).unwrap(), png_bytes("stroke"));

  env
    .daypage_cmd()
    .arg("export")
    .arg("2024-01-01")
    .arg(&dest)
    .assert()
    .success();

  assert_eq!(std::fs::read(&dest).unwrap(), png_bytes("stroke"));
}

#[test]
fn import_rejects_non_png() {
  let env = TestEnv::empty();
  let source = env.write_file("notes.txt", b"just text");

  env
    .daypage_cmd()
    .arg("import")
    .arg("2024-01-01")
    .arg(&source)
    .assert()
    .failure()
    .stderr(predicate::str::contains("not a PNG"));

  assert!(!env.page_path("2024-01-01").exists());
}

#[test]
fn export_missing_page_fails() {
  let env = TestEnv::empty();

  env
    .daypage_cmd()
    .arg("export")
    .arg("2024-01-01")
    .arg(env.temp.path().join("out.png"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("No drawing for 2024-01-01"));
}

#[test]
fn show_existing_page() {
  let env = TestEnv::empty();
  env.seed_page("2024-01-01", &png_bytes("a"));

  env
    .daypage_cmd()
    .args(["show", "2024-01-01"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Page 2024-01-01"))
    .stdout(predicate::str::contains("Monday, January 1 2024"));
}

#[test]
fn show_missing_page_json() {
  let env = TestEnv::empty();

  let output = env
    .daypage_cmd()
    .args(["show", "2024-01-01", "-o", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(json["exists"], false);
  assert!(json["digest"].is_null());
}

#[test]
fn show_corrupt_page_fails() {
  let env = TestEnv::empty();
  env.seed_page("2024-01-01", b"garbage");

  env
    .daypage_cmd()
    .args(["show", "2024-01-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn invalid_date_is_rejected() {
  let env = TestEnv::empty();

  env
    .daypage_cmd()
    .args(["show", "yesterday-ish"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not a date"));
}

#[test]
fn pages_dir_flag_overrides_env() {
  let env = TestEnv::empty();
  let other = env.temp.path().join("elsewhere");
  let source = env.write_file("drawing.png", &png_bytes("x"));

  env
    .daypage_cmd()
    .arg("--pages-dir")
    .arg(&other)
    .arg("import")
    .arg("2024-01-01")
    .arg(&source)
    .assert()
    .success();

  assert!(other.join("2024-01-01.png").exists());
  assert!(!env.page_path("2024-01-01").exists());
}
