//! Test environment for running the ctxplan binary against a solution on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::fixtures::{INVENTORY, NET_LAYER, SOLUTION};

/// Result of running a ctxplan command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A solution directory with its inventory and layers.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// The standard fixture: solution, inventory and the `Net` layer.
    pub fn new() -> Self {
        let env = Self::empty();
        env.write("demo.csolution.yml", SOLUTION);
        env.write("inventory.yml", INVENTORY);
        env.write("layers/Net.clayer.yml", NET_LAYER);
        env
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn solution(&self) -> PathBuf {
        self.path().join("demo.csolution.yml")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, content).expect("failed to write fixture");
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.path().join(relative)).ok()
    }

    /// Run `ctxplan <args...>` with the solution directory as working directory.
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_ctxplan"))
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("CTXPLAN_LOAD")
            .env_remove("CTXPLAN_FROZEN_PACKS")
            .env_remove("CTXPLAN_LAYER_PATH")
            .env_remove("CTXPLAN_TOOLCHAIN")
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .output()
            .expect("failed to run ctxplan");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
