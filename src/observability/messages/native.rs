// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the in-process compiler.

use super::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// A diagnostic reported by the native compiler.
///
/// # Log Level
/// `warn!` - Printed on every compile, successful or not
pub struct NativeDiagnostic<'a> {
    pub source_path: &'a Path,
    pub message: &'a str,
}

impl Display for NativeDiagnostic<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.source_path.display(), self.message)
    }
}

impl StructuredLog for NativeDiagnostic<'_> {
    fn log(&self) {
        tracing::warn!(source_path = %self.source_path.display(), "{}", self);
    }
}

/// The native compiler returned no payload.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct NativeCompileFailed<'a> {
    pub source_path: &'a Path,
    pub target: &'a str,
}

impl Display for NativeCompileFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Typst compilation failed, no {} generated for {}",
            self.target,
            self.source_path.display()
        )
    }
}

impl StructuredLog for NativeCompileFailed<'_> {
    fn log(&self) {
        tracing::error!(
            source_path = %self.source_path.display(),
            target = self.target,
            "{}", self
        );
    }
}
