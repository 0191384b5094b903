#![allow(dead_code)]

use alibuild_ops::{AliBuild, MockRunner};
use std::fs;
use tempfile::TempDir;

/// Handle on `alibuild` / `O2` backed by a mock, plus a second view of the mock.
pub fn mock_handle(env: Vec<String>) -> (AliBuild<MockRunner>, MockRunner) {
    let runner = MockRunner::new();
    let ab = AliBuild::with_runner("alibuild", "O2", env, runner.clone());
    (ab, runner)
}

/// Write a shell script standing in for aliBuild.
///
/// Returns the temp dir guard and an executable string (`sh <script>`) usable
/// as the handle's executable path.
pub fn fake_alibuild(body: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let script = dir.path().join("fake-alibuild.sh");
    fs::write(&script, format!("#!/bin/sh\n{body}\n")).expect("failed to write script");
    let exe = format!("sh {}", script.display());
    (dir, exe)
}
