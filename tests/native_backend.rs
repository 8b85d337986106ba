// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#![cfg(all(unix, feature = "typst-native"))]

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::path::Path;
use tempfile::TempDir;

fn typst_bridge(workspace: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("typst-bridge"));
    cmd.env_remove("ELEVENTY_RUN_MODE")
        .env_remove("RUST_LOG")
        .env_remove("NODE_ENV")
        .arg("--backend")
        .arg("native")
        .arg("--workspace")
        .arg(workspace);
    cmd
}

#[test]
fn broken_source_in_build_mode_aborts() {
    let workspace = TempDir::new().unwrap();
    let source = workspace.path().join("broken.typ");
    std::fs::write(&source, "#undefined-name\n").unwrap();

    typst_bridge(workspace.path())
        .args(["--mode", "build", "compile"])
        .arg(&source)
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("aborting build"))
        .stderr(contains("unknown variable"));
}

#[test]
fn broken_source_in_watch_mode_keeps_the_process_alive() {
    let workspace = TempDir::new().unwrap();
    let source = workspace.path().join("broken.typ");
    std::fs::write(&source, "#undefined-name\n").unwrap();

    typst_bridge(workspace.path())
        .args(["--mode", "watch", "compile"])
        .arg(&source)
        .assert()
        .failure()
        .stderr(contains("aborting build").not());
}

#[test]
fn valid_source_compiles_to_html_body() {
    let workspace = TempDir::new().unwrap();
    let source = workspace.path().join("post.typ");
    std::fs::write(&source, "Hello from native\n").unwrap();

    typst_bridge(workspace.path())
        .args(["--mode", "build", "compile"])
        .arg(&source)
        .assert()
        .success()
        .stdout(contains("Hello from native"));
}
