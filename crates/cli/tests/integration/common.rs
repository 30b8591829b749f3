//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Eight-byte PNG signature every page must start with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// PNG-signed bytes tagged with `tag`, enough for the store to accept.
pub fn png_bytes(tag: &str) -> Vec<u8> {
  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend_from_slice(tag.as_bytes());
  bytes
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory; pages live in `pages/`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Pages directory (isolated per test).
  pub fn pages_dir(&self) -> PathBuf {
    self.temp.path().join("pages")
  }

  pub fn page_path(&self, date: &str) -> PathBuf {
    self.pages_dir().join(format!("{}.png", date))
  }

  /// Write a file relative to the temp directory and return its path.
  pub fn write_file(&self, relative_path: &str, content: &[u8]) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Store a page directly, bypassing the CLI.
  pub fn seed_page(&self, date: &str, content: &[u8]) {
    std::fs::create_dir_all(self.pages_dir()).unwrap();
    std::fs::write(self.page_path(date), content).unwrap();
  }

  /// Get a Command for the daypage binary with isolated environment.
  pub fn daypage_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("daypage");
    cmd.env("DAYPAGE_PAGES_DIR", self.pages_dir());
    cmd.env_remove("DAYPAGE_IDLE_WINDOW");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
