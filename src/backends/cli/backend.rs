// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Instrument;

use super::args::compose;
use super::invocation::{Invocation, InvocationOutput};
use super::manifest::ManifestSlot;
use crate::config::consts::DEFAULT_SYSTEM_EXECUTABLE;
use crate::config::BackendConfig;
use crate::errors::CompileError;
use crate::model::{Artifact, BuildMode, CompileRequest, CompileResult, PdfOptions};
use crate::observability::messages::backend::{DependenciesResolved, QueryFailed};
use crate::observability::messages::subprocess::{
    CompilerWarnings, InvocationCompleted, InvocationFailed, InvocationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::output::{shape_html, unwrap_first_match};
use crate::traits::Backend;

/// Output format of a `typst compile` run written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Pdf,
}

impl OutputFormat {
    /// Flags selecting the format. Writing to `-` means the CLI cannot infer it.
    fn flags(self) -> &'static [&'static str] {
        match self {
            OutputFormat::Html => &["--features", "html", "--format", "html"],
            OutputFormat::Pdf => &["--format", "pdf"],
        }
    }
}

/// Backend that runs the `typst` CLI once per request.
///
/// Every compile gets its own dependency manifest, so concurrent calls never
/// share temp files. Compile failures are escalated per [`BuildMode`];
/// query failures never are.
pub struct CliBackend {
    config: BackendConfig,
    executable: PathBuf,
    mode: BuildMode,
}

impl CliBackend {
    /// Create a backend for `config.executable_path`, or `typst` on `PATH` when unset.
    ///
    /// The workspace and font directories are made absolute here. The child
    /// runs inside the workspace, so nothing relative may reach its arguments.
    pub fn new(config: BackendConfig, mode: BuildMode) -> Self {
        let config = config.resolve_paths();
        let executable = config
            .executable_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_EXECUTABLE));
        Self {
            config,
            executable,
            mode,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    async fn compile(
        &self,
        request: &CompileRequest,
        format: OutputFormat,
    ) -> Result<(Vec<u8>, Vec<PathBuf>), CompileError> {
        let source = request.source_path();
        let main_path = request.resolved_source_path();

        let slot = match ManifestSlot::allocate() {
            Ok(slot) => Some(slot),
            Err(error) => {
                tracing::warn!(
                    source_path = %source.display(),
                    %error,
                    "could not allocate dependency manifest, compiling without dependency tracking"
                );
                None
            }
        };
        let manifest_path = slot.as_ref().map(ManifestSlot::path);

        let pdf: Option<&PdfOptions> = match format {
            OutputFormat::Pdf => request
                .pdf_options()
                .or(self.config.default_pdf_options.as_ref()),
            OutputFormat::Html => None,
        };

        let mut args: Vec<OsString> = vec!["compile".into()];
        args.extend(format.flags().iter().map(OsString::from));
        args.extend(compose(&self.config, request, pdf, manifest_path.as_deref()));
        args.push(main_path.into());
        args.push("-".into());

        let output = self
            .run("compile", args, source)
            .await
            .map_err(|error| self.mode.escalate(source, error))?;

        let dependencies = slot
            .map(|slot| slot.read(&self.config.workspace))
            .unwrap_or_default();
        DependenciesResolved {
            source_path: source,
            dependencies: &dependencies,
        }
        .log();

        Ok((output.stdout, dependencies))
    }

    async fn run(
        &self,
        subcommand: &str,
        args: Vec<OsString>,
        source: &Path,
    ) -> Result<InvocationOutput, CompileError> {
        let started = InvocationStarted {
            executable: &self.executable,
            subcommand,
            arg_count: args.len(),
        };
        started.log();
        let span = started.span();

        let start = Instant::now();
        let result = Invocation::new(&self.executable, args)
            .with_current_dir(&self.config.workspace)
            .run()
            .instrument(span)
            .await;

        match &result {
            Ok(output) => {
                InvocationCompleted {
                    executable: &self.executable,
                    stdout_bytes: output.stdout.len(),
                    duration: start.elapsed(),
                }
                .log();
                if !output.stderr.is_empty() {
                    CompilerWarnings {
                        source_path: source,
                        stderr: &String::from_utf8_lossy(&output.stderr),
                    }
                    .log();
                }
            }
            Err(error) => InvocationFailed {
                executable: &self.executable,
                source_path: source,
                error,
            }
            .log(),
        }

        result
    }
}

#[async_trait]
impl Backend for CliBackend {
    async fn compile_html(&self, request: &CompileRequest) -> Result<CompileResult, CompileError> {
        let (stdout, dependencies) = self.compile(request, OutputFormat::Html).await?;

        let document = String::from_utf8(stdout).map_err(|_| {
            self.mode.escalate(
                request.source_path(),
                CompileError::InvalidUtf8 {
                    source_path: request.source_path().to_path_buf(),
                },
            )
        })?;

        let html = shape_html(document, request.output_range());
        Ok(CompileResult::tracked(Artifact::Html(html), dependencies))
    }

    async fn compile_pdf(&self, request: &CompileRequest) -> Result<CompileResult, CompileError> {
        let (stdout, dependencies) = self.compile(request, OutputFormat::Pdf).await?;
        Ok(CompileResult::tracked(Artifact::Pdf(stdout), dependencies))
    }

    async fn query_metadata(&self, request: &CompileRequest, selector: &str) -> Option<Value> {
        let source = request.source_path();

        let mut args: Vec<OsString> = vec!["query".into()];
        args.extend(compose(&self.config, request, None, None));
        args.push(request.resolved_source_path().into());
        args.push(selector.into());

        let output = match self.run("query", args, source).await {
            Ok(output) => output,
            Err(error) => {
                QueryFailed {
                    source_path: source,
                    selector,
                    reason: &error.to_string(),
                }
                .log();
                return None;
            }
        };

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return None;
        }

        match serde_json::from_slice::<Value>(&output.stdout) {
            Ok(raw) => unwrap_first_match(&raw),
            Err(error) => {
                QueryFailed {
                    source_path: source,
                    selector,
                    reason: &format!("failed to parse query result: {error}"),
                }
                .log();
                None
            }
        }
    }

    fn identify(&self) -> String {
        match &self.config.executable_path {
            None => "typst-cli (system)".to_string(),
            Some(path) => format!("typst-cli ({})", path.display()),
        }
    }
}
