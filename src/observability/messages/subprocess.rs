// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for compiler subprocess events.
//!
//! This module contains message types for logging events related to:
//! * Compiler process spawn, streaming, and exit
//! * Compiler warnings on stderr
//! * Dependency manifest reads

use super::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// Compiler process spawned.
///
/// # Log Level
/// `debug!` - Routine
///
/// # Example
/// ```
/// use typst_bridge::observability::messages::subprocess::InvocationStarted;
/// use std::path::Path;
///
/// let msg = InvocationStarted {
///     executable: Path::new("typst"),
///     subcommand: "compile",
///     arg_count: 9,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct InvocationStarted<'a> {
    pub executable: &'a Path,
    pub subcommand: &'a str,
    pub arg_count: usize,
}

impl Display for InvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Spawned '{} {}' with {} arguments",
            self.executable.display(),
            self.subcommand,
            self.arg_count
        )
    }
}

impl StructuredLog for InvocationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            executable = %self.executable.display(),
            subcommand = self.subcommand,
            arg_count = self.arg_count,
            "{}", self
        );
    }

    fn span(&self) -> Span {
        tracing::debug_span!(
            "typst_invocation",
            executable = %self.executable.display(),
            subcommand = self.subcommand,
        )
    }
}

/// Compiler process exited successfully.
///
/// # Log Level
/// `debug!` - Routine
pub struct InvocationCompleted<'a> {
    pub executable: &'a Path,
    pub stdout_bytes: usize,
    pub duration: std::time::Duration,
}

impl Display for InvocationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' completed: stdout={} bytes, duration={:?}",
            self.executable.display(),
            self.stdout_bytes,
            self.duration
        )
    }
}

impl StructuredLog for InvocationCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            executable = %self.executable.display(),
            stdout_bytes = self.stdout_bytes,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Compiler process failed to start or exited non-zero.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use typst_bridge::observability::messages::subprocess::InvocationFailed;
/// use std::path::Path;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
/// let msg = InvocationFailed {
///     executable: Path::new("typst"),
///     source_path: Path::new("posts/hello.typ"),
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct InvocationFailed<'a> {
    pub executable: &'a Path,
    pub source_path: &'a Path,
    pub error: &'a dyn std::error::Error,
}

impl Display for InvocationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Typst CLI execution failed for {} ('{}'): {}",
            self.source_path.display(),
            self.executable.display(),
            self.error
        )
    }
}

impl StructuredLog for InvocationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            executable = %self.executable.display(),
            source_path = %self.source_path.display(),
            error = %self.error,
            "{}", self
        );
    }
}

/// Compiler succeeded but wrote warnings to stderr.
///
/// # Log Level
/// `warn!` - Worth surfacing, not a failure
pub struct CompilerWarnings<'a> {
    pub source_path: &'a Path,
    pub stderr: &'a str,
}

impl Display for CompilerWarnings<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Typst CLI warnings for {}: {}",
            self.source_path.display(),
            self.stderr.trim_end()
        )
    }
}

impl StructuredLog for CompilerWarnings<'_> {
    fn log(&self) {
        tracing::warn!(source_path = %self.source_path.display(), "{}", self);
    }
}

/// Dependency manifest could not be read or parsed.
///
/// # Log Level
/// `warn!` - Dependencies degrade to an empty list
pub struct ManifestUnreadable<'a> {
    pub manifest_path: &'a Path,
    pub error: &'a dyn std::error::Error,
}

impl Display for ManifestUnreadable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to read dependency manifest '{}', reporting no dependencies: {}",
            self.manifest_path.display(),
            self.error
        )
    }
}

impl StructuredLog for ManifestUnreadable<'_> {
    fn log(&self) {
        tracing::warn!(
            manifest_path = %self.manifest_path.display(),
            error = %self.error,
            "{}", self
        );
    }
}
