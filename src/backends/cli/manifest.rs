// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dependency manifests written by `typst compile --deps <file> --deps-format json`.
//!
//! ```json
//! { "inputs": ["main.typ", "sub/chapter.typ"], "outputs": [] }
//! ```
//!
//! Dependency tracking is best effort: any read or parse failure is logged
//! and reported as an empty list, never as an error.

use crate::config::consts::MANIFEST_FILE_NAME;
use crate::observability::messages::subprocess::ManifestUnreadable;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
struct DependencyManifest {
    inputs: Vec<PathBuf>,
}

/// A fresh, private location for one invocation's manifest.
///
/// The containing temp directory is removed when the slot is dropped, on
/// success and failure paths alike.
#[derive(Debug)]
pub struct ManifestSlot {
    dir: TempDir,
}

impl ManifestSlot {
    pub fn allocate() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("typst-deps-").tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join(MANIFEST_FILE_NAME)
    }

    /// Read the manifest once and resolve its entries against `workspace`.
    pub fn read(self, workspace: &Path) -> Vec<PathBuf> {
        read_manifest(&self.path(), workspace)
    }
}

/// Read and resolve a manifest file, degrading to an empty list on failure.
pub fn read_manifest(path: &Path, workspace: &Path) -> Vec<PathBuf> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            ManifestUnreadable {
                manifest_path: path,
                error: &error,
            }
            .log();
            return Vec::new();
        }
    };

    match parse_manifest(&text, workspace) {
        Ok(dependencies) => dependencies,
        Err(error) => {
            ManifestUnreadable {
                manifest_path: path,
                error: &error,
            }
            .log();
            Vec::new()
        }
    }
}

/// Parse manifest text, resolving every entry against `workspace`.
///
/// typst writes relative entries against its working directory, which is
/// the workspace for every invocation. Absolute entries are kept as they are.
pub fn parse_manifest(text: &str, workspace: &Path) -> Result<Vec<PathBuf>, serde_json::Error> {
    let manifest: DependencyManifest = serde_json::from_str(text)?;
    Ok(manifest
        .inputs
        .iter()
        .map(|input| workspace.join(input))
        .collect())
}
