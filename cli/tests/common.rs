//! # EyeQA CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the real `eyeqa` binary inside a `Sandbox`: a temporary directory used as
//! working directory, home and XDG config/data location, so user
//! configuration and chat history on the machine running the tests are never
//! read or touched.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// # Get EyeQA Command (`eyeqa_cmd`)
///
/// `assert_cmd::Command` for the compiled `eyeqa` binary.
///
/// ## Panics
/// Panics if the `eyeqa` binary cannot be found via `Command::cargo_bin`.
pub fn eyeqa_cmd() -> Command {
    Command::cargo_bin("eyeqa").expect("Failed to find eyeqa binary for testing")
}

/// An isolated environment for one test.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create sandbox directory"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `content` to `name` inside the sandbox and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write sandbox file");
        path
    }

    /// `eyeqa` command confined to the sandbox.
    pub fn cmd(&self) -> Command {
        let root = self.dir.path();
        let mut cmd = eyeqa_cmd();
        cmd.current_dir(root)
            .env("HOME", root)
            .env("XDG_CONFIG_HOME", root.join(".config"))
            .env("XDG_DATA_HOME", root.join(".local/share"))
            .env_remove("RUST_LOG");
        cmd
    }
}

/// A small knowledge base in the TOML format.
pub const SMALL_KNOWLEDGE_BASE: &str = r#"
[[entry]]
question = "Is the clinic open on weekends?"
category = "general"
answer = "Yes, on Saturdays."

[[entry]]
question = "how do donors register"
category = "donor"
answer = "Online or at the DMV."
"#;
