// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for backend selection and backend-independent events.
//!
//! This module contains message types for logging events related to:
//! * Backend construction at startup
//! * Build-mode aborts
//! * Metadata query degradation
//! * Dependency reporting

use super::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Backend constructed by the factory.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use typst_bridge::observability::messages::backend::BackendSelected;
///
/// let msg = BackendSelected {
///     kind: "subprocess-system",
///     description: "typst-cli (system)",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BackendSelected<'a> {
    pub kind: &'a str,
    pub description: &'a str,
}

impl Display for BackendSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Using Typst backend: {}", self.description)
    }
}

impl StructuredLog for BackendSelected<'_> {
    fn log(&self) {
        tracing::info!(kind = self.kind, description = self.description, "{}", self);
    }
}

/// The system compiler could not be found on `PATH` at startup.
///
/// # Log Level
/// `warn!` - Compilation will fail with a spawn error later
pub struct ExecutableNotFound<'a> {
    pub executable: &'a Path,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutableNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Typst executable '{}' not found on PATH: {}",
            self.executable.display(),
            self.error
        )
    }
}

impl StructuredLog for ExecutableNotFound<'_> {
    fn log(&self) {
        tracing::warn!(
            executable = %self.executable.display(),
            error = %self.error,
            "{}", self
        );
    }
}

/// A compilation failed during a production build; the process is exiting.
///
/// # Log Level
/// `error!` - Fatal
pub struct BuildAborted<'a> {
    pub source_path: &'a Path,
    pub error: &'a dyn std::error::Error,
}

impl Display for BuildAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Typst compilation of {} failed in build mode, aborting build: {}",
            self.source_path.display(),
            self.error
        )
    }
}

impl StructuredLog for BuildAborted<'_> {
    fn log(&self) {
        tracing::error!(
            source_path = %self.source_path.display(),
            error = %self.error,
            "{}", self
        );
    }
}

/// A metadata query failed and was degraded to "no metadata".
///
/// # Log Level
/// `warn!` - Degraded result, never an error for the caller
pub struct QueryFailed<'a> {
    pub source_path: &'a Path,
    pub selector: &'a str,
    pub reason: &'a str,
}

impl Display for QueryFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Typst metadata query '{}' failed for {}: {}",
            self.selector,
            self.source_path.display(),
            self.reason
        )
    }
}

impl StructuredLog for QueryFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            source_path = %self.source_path.display(),
            selector = self.selector,
            reason = self.reason,
            "{}", self
        );
    }
}

/// Dependencies reported for a compiled file.
///
/// # Log Level
/// `debug!` - Routine
pub struct DependenciesResolved<'a> {
    pub source_path: &'a Path,
    pub dependencies: &'a [PathBuf],
}

impl Display for DependenciesResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Typst dependencies for {}: {:?}",
            self.source_path.display(),
            self.dependencies
        )
    }
}

impl StructuredLog for DependenciesResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            source_path = %self.source_path.display(),
            count = self.dependencies.len(),
            "{}", self
        );
    }
}
