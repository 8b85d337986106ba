// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::INPUT_BUILD_DATE_KEY;
use crate::config::BackendConfig;
use crate::model::{CompileRequest, PdfOptions};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One compilation handed to an in-process compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeRequest {
    pub main_path: PathBuf,
    /// `sys.inputs` for the document.
    pub inputs: BTreeMap<String, String>,
}

impl NativeRequest {
    /// Build the request for `request`, adding the build timestamp when the
    /// backend has one.
    pub fn from_request(request: &CompileRequest, config: &BackendConfig) -> Self {
        let mut inputs: BTreeMap<String, String> = request
            .inputs()
            .pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        if let Some(timestamp) = &config.build_timestamp {
            inputs.insert(INPUT_BUILD_DATE_KEY.to_string(), timestamp.clone());
        }

        Self {
            main_path: request.resolved_source_path(),
            inputs,
        }
    }
}

/// Outcome of a native compile: an optional payload plus every diagnostic
/// the compiler reported, whether or not it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeOutput<T> {
    pub payload: Option<T>,
    pub diagnostics: Vec<String>,
}

impl<T> NativeOutput<T> {
    pub fn success(payload: T) -> Self {
        Self {
            payload: Some(payload),
            diagnostics: Vec::new(),
        }
    }

    pub fn failure(diagnostics: Vec<String>) -> Self {
        Self {
            payload: None,
            diagnostics,
        }
    }
}

/// A long-lived in-process compiler handle.
///
/// Implementations are not expected to be reentrant: the native backend
/// serializes every call behind a lock and runs it on the blocking pool.
pub trait NativeCompiler: Send {
    /// Compile to a full HTML document.
    fn html(&mut self, request: &NativeRequest) -> NativeOutput<String>;

    fn pdf(&mut self, request: &NativeRequest, options: Option<&PdfOptions>) -> NativeOutput<Vec<u8>>;

    /// Run a selector query, returning every match as a JSON array.
    fn query(&mut self, request: &NativeRequest, selector: &str) -> Result<Value, String>;
}
