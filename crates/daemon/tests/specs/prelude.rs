// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for dfd specs

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

pub const FRANKLIN: &str = r#"{"type":"bucket_list","items":[{"id":"v1","name":"Franklin Barbecue","coordinates":{"latitude":30.2701,"longitude":-97.7313},"notificationsEnabled":true}]}"#;
pub const AT_FRANKLIN: &str = r#"{"type":"position","latitude":30.2701,"longitude":-97.7313}"#;
pub const FAR_AWAY: &str = r#"{"type":"position","latitude":40.7128,"longitude":-74.0060}"#;
pub const FLUSH: &str = r#"{"type":"flush"}"#;
pub const STATUS: &str = r#"{"type":"status"}"#;

/// An isolated dfd state directory
pub struct StateDir {
    dir: TempDir,
}

impl StateDir {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the state directory
    pub fn file(&self, path: &str, content: &str) {
        std::fs::write(self.dir.path().join(path), content).unwrap();
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    /// Run dfd with `lines` on stdin; it exits when stdin closes
    pub fn run(&self, lines: &[&str]) -> Run {
        let mut input = lines.join("\n");
        input.push('\n');

        let assert = self.dfd().write_stdin(input).assert();
        Run { assert }
    }

    /// A dfd command bound to this state directory
    pub fn dfd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dfd").unwrap();
        cmd.env("DINNAFIND_STATE_DIR", self.path())
            .env("RUST_LOG", "debug")
            .timeout(std::time::Duration::from_secs(30));
        cmd
    }
}

pub struct Run {
    assert: assert_cmd::assert::Assert,
}

impl Run {
    pub fn passes(self) -> Self {
        Self {
            assert: self.assert.success(),
        }
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(needle)),
        }
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        Self {
            assert: self
                .assert
                .stdout(predicate::str::contains(needle).not()),
        }
    }

    /// Output lines as JSON values
    pub fn lines(&self) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(&self.assert.get_output().stdout)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// Output lines of the given `type`
    pub fn outputs(&self, kind: &str) -> Vec<serde_json::Value> {
        self.lines()
            .into_iter()
            .filter(|v| v["type"] == kind)
            .collect()
    }
}
