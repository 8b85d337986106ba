// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build mode and the failure-severity switch it drives.

use crate::config::consts::RUN_MODE_ENV;
use crate::errors::CompileError;
use crate::observability::messages::backend::BuildAborted;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Operating mode of the host process.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
    /// One-shot production build. Compilation failures stop the process.
    Build,
    /// Interactive/watch session. Compilation failures are returned to the caller.
    #[default]
    #[serde(alias = "serve")]
    Watch,
}

/// What to do with a compilation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Terminate the host process with a non-zero exit code.
    Abort,
    /// Hand the failure back to the caller.
    Recover,
}

impl BuildMode {
    /// Read the mode from the host environment (`ELEVENTY_RUN_MODE`).
    ///
    /// Returns `None` when the variable is unset.
    pub fn from_env() -> Option<Self> {
        let value = std::env::var(RUN_MODE_ENV).ok()?;
        Some(if value == "build" {
            BuildMode::Build
        } else {
            BuildMode::Watch
        })
    }

    pub fn failure_action(self) -> FailureAction {
        match self {
            BuildMode::Build => FailureAction::Abort,
            BuildMode::Watch => FailureAction::Recover,
        }
    }

    /// Apply the severity switch to a compilation failure.
    ///
    /// In build mode this never returns: the failure is logged and the process
    /// exits with status 1. Otherwise the error is handed back unchanged.
    pub(crate) fn escalate(self, source: &Path, error: CompileError) -> CompileError {
        match self.failure_action() {
            FailureAction::Abort => abort_build(source, &error),
            FailureAction::Recover => error,
        }
    }
}

/// Stop the whole build. A failed compile must not leave partial output behind.
pub(crate) fn abort_build(source: &Path, error: &dyn std::error::Error) -> ! {
    BuildAborted {
        source_path: source,
        error,
    }
    .log();
    std::process::exit(1)
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(BuildMode::Build),
            "watch" | "serve" => Ok(BuildMode::Watch),
            other => Err(format!(
                "Unknown build mode '{}'. Valid options are: build, watch",
                other
            )),
        }
    }
}
