// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::BackendKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or constructing a backend.
///
/// These are always fatal: they surface at startup, before any compilation
/// is attempted, and are never retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A backend kind that needs an executable path was configured without one.
    #[error("executable_path must be specified for the {kind} backend")]
    MissingExecutablePath { kind: BackendKind },

    /// An option was supplied to a backend that cannot honor it.
    #[error("{option} is not supported by the {backend} backend. {hint}")]
    UnsupportedOption {
        backend: BackendKind,
        option: &'static str,
        hint: &'static str,
    },

    /// The backend name did not match any known kind.
    #[error("Unknown backend type: {0}. Valid options are: \"native\", \"subprocess-system\", \"subprocess-custom\"")]
    UnknownBackend(String),

    /// The native backend was selected but not compiled in.
    #[error("the native backend requires building with the `typst-native` feature")]
    NativeUnavailable,

    /// The native compiler handle could not be created.
    #[error("failed to initialize native compiler: {0}")]
    NativeInit(String),

    /// The workspace path could not be made absolute.
    #[error("invalid workspace '{}': {source}", .path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config file format '{}' (expected .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
}
