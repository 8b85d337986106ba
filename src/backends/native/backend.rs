// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::compiler::{NativeCompiler, NativeOutput, NativeRequest};
use crate::config::{BackendConfig, BackendKind};
use crate::errors::{CompileError, ConfigError};
use crate::model::{abort_build, Artifact, BuildMode, CompileRequest, CompileResult, FailureAction};
use crate::observability::messages::backend::QueryFailed;
use crate::observability::messages::native::{NativeCompileFailed, NativeDiagnostic};
use crate::observability::messages::StructuredLog;
use crate::output::{shape_html, unwrap_first_match};
use crate::traits::Backend;

type SharedCompiler = Arc<Mutex<Box<dyn NativeCompiler>>>;

/// Backend that compiles in-process through a single long-lived handle.
///
/// The handle is not reentrant, so calls are serialized behind an async
/// lock and each one runs on the blocking pool. Dependencies are never
/// tracked.
pub struct NativeBackend {
    config: BackendConfig,
    mode: BuildMode,
    compiler: SharedCompiler,
}

impl NativeBackend {
    /// Validate `config` and open the compiler handle with `open`.
    ///
    /// `extra_args` has no in-process meaning, so a non-empty list is a
    /// configuration error and `open` is never called. `open` sees the
    /// workspace and font directories already made absolute.
    pub fn new<F>(config: BackendConfig, mode: BuildMode, open: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&BackendConfig) -> Result<Box<dyn NativeCompiler>, ConfigError>,
    {
        if !config.extra_args.is_empty() {
            return Err(ConfigError::UnsupportedOption {
                backend: BackendKind::Native,
                option: "extra_args",
                hint: "Use a subprocess backend to pass extra arguments to the typst CLI.",
            });
        }

        let config = config.resolve_paths();
        let compiler = open(&config)?;
        Ok(Self {
            config,
            mode,
            compiler: Arc::new(Mutex::new(compiler)),
        })
    }

    /// Run `work` against the handle on the blocking pool, one call at a time.
    async fn with_compiler<R, F>(&self, work: F) -> Result<R, CompileError>
    where
        F: FnOnce(&mut dyn NativeCompiler) -> R + Send + 'static,
        R: Send + 'static,
    {
        let mut guard = Arc::clone(&self.compiler).lock_owned().await;
        tokio::task::spawn_blocking(move || work(&mut **guard))
            .await
            .map_err(|error| CompileError::Native(error.to_string()))
    }

    /// Print diagnostics and apply the build mode to a missing payload.
    fn settle<T>(&self, source: &Path, target: &'static str, output: NativeOutput<T>) -> Option<T> {
        for message in &output.diagnostics {
            NativeDiagnostic {
                source_path: source,
                message,
            }
            .log();
        }

        if output.payload.is_none() {
            NativeCompileFailed {
                source_path: source,
                target,
            }
            .log();
            if self.mode.failure_action() == FailureAction::Abort {
                abort_build(
                    source,
                    &CompileError::NoOutput {
                        source_path: source.to_path_buf(),
                        target,
                    },
                );
            }
        }
        output.payload
    }
}

#[async_trait]
impl Backend for NativeBackend {
    async fn compile_html(&self, request: &CompileRequest) -> Result<CompileResult, CompileError> {
        let source = request.source_path();
        let native = NativeRequest::from_request(request, &self.config);

        let output = self
            .with_compiler(move |compiler| compiler.html(&native))
            .await
            .map_err(|error| self.mode.escalate(source, error))?;

        let html = self
            .settle(source, "HTML", output)
            .map(|document| Artifact::Html(shape_html(document, request.output_range())));
        Ok(CompileResult::untracked(html))
    }

    async fn compile_pdf(&self, request: &CompileRequest) -> Result<CompileResult, CompileError> {
        let source = request.source_path();
        let native = NativeRequest::from_request(request, &self.config);
        let options = request
            .pdf_options()
            .or(self.config.default_pdf_options.as_ref())
            .cloned();

        let output = self
            .with_compiler(move |compiler| compiler.pdf(&native, options.as_ref()))
            .await
            .map_err(|error| self.mode.escalate(source, error))?;

        let pdf = self.settle(source, "PDF", output).map(Artifact::Pdf);
        Ok(CompileResult::untracked(pdf))
    }

    async fn query_metadata(&self, request: &CompileRequest, selector: &str) -> Option<Value> {
        let source = request.source_path();
        let native = NativeRequest::from_request(request, &self.config);
        let owned_selector = selector.to_string();

        let outcome = self
            .with_compiler(move |compiler| compiler.query(&native, &owned_selector))
            .await
            .map_err(|error| error.to_string())
            .and_then(|result| result);

        match outcome {
            Ok(raw) => unwrap_first_match(&raw),
            Err(reason) => {
                QueryFailed {
                    source_path: source,
                    selector,
                    reason: &reason,
                }
                .log();
                None
            }
        }
    }

    fn identify(&self) -> String {
        "typst-native (in-process)".to_string()
    }
}
