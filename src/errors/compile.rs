// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Recoverable compilation failures, as seen by callers running outside build mode.
///
/// In build mode the backends terminate the process instead of returning
/// these (see [`crate::model::BuildMode`]).
#[derive(Error, Debug)]
pub enum CompileError {
    /// The compiler executable could not be started.
    #[error("failed to spawn '{}': {source}", .executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran and exited unsuccessfully. `stderr` carries its diagnostics.
    #[error("typst exited with {}: {stderr}", describe_status(.code))]
    ExitStatus { code: Option<i32>, stderr: String },

    /// The native compiler produced no payload.
    #[error("typst compilation failed, no {target} generated for {}", .source_path.display())]
    NoOutput {
        source_path: PathBuf,
        target: &'static str,
    },

    /// HTML output was not valid UTF-8.
    #[error("compiler output for {} is not valid UTF-8", .source_path.display())]
    InvalidUtf8 { source_path: PathBuf },

    /// The invocation was cancelled before the compiler exited.
    #[error("compilation cancelled")]
    Cancelled,

    /// The native worker task panicked or was aborted.
    #[error("native compiler task failed: {0}")]
    Native(String),

    /// Reading compiler output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}
