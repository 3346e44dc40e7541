//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that isolate configuration discovery
//! - Test data fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small tree shared by most command tests.
#[allow(dead_code)]
pub const SAMPLE_TREE: &str = "\
Company:
  _title: Acme
  Engineering:
    _description: Builds things
    Platform:
      _icon: gear
    Mobile:
  Sales:
Archive:
";

/// Test environment with an isolated working and home directory.
///
/// Commands run with the temporary directory as both the working directory
/// and `HOME`, so no real `nodepath.yaml` or user configuration leaks in.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Directory used as `HOME`
    pub home_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().join("work");
        let home_dir = temp_dir.path().join("home");
        std::fs::create_dir_all(&temp_path).expect("Failed to create work dir");
        std::fs::create_dir_all(&home_dir).expect("Failed to create home dir");

        Self {
            temp_dir,
            temp_path,
            home_dir,
        }
    }

    /// Get a command builder for the nodepath binary.
    ///
    /// Configuration-related environment variables are cleared.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("nodepath").expect("Failed to find nodepath binary");
        cmd.current_dir(&self.temp_path)
            .env("HOME", &self.home_dir)
            .env_remove("NODEPATH_CONFIG")
            .env_remove("NODEPATH_TREE")
            .env_remove("NODEPATH_START")
            .env_remove("NODEPATH_OUTPUT_FORMAT")
            .env_remove("NODEPATH_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the working directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write [`SAMPLE_TREE`] to `tree.yaml` and return its path.
    pub fn sample_tree(&self) -> PathBuf {
        self.write("tree.yaml", SAMPLE_TREE)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
