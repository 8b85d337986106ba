// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::absolute_or_keep;
use crate::config::consts::{INPUT_DATA_KEY, INPUT_ENVIRONMENT_KEY};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Which part of a compiled HTML document a caller wants back.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputRange {
    /// Only the inner content of `<body>`.
    #[default]
    Body,
    /// The whole document, verbatim.
    #[serde(alias = "all")]
    Full,
}

/// PDF export options.
///
/// ```yaml
/// pdf_options:
///   standard: a-2b
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PdfOptions {
    /// PDF standard/profile to enforce (e.g. `1.7`, `a-2b`).
    pub standard: Option<String>,
}

/// Per-request values passed into the compiler's `sys.inputs` namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicInputs {
    /// Serialized page/collection/target metadata, opaque to this crate.
    pub data: Option<String>,
    /// Environment name (`production`, `development`, ...).
    pub environment: Option<String>,
}

impl DynamicInputs {
    /// Populated inputs as `(key, value)` pairs in their fixed order.
    ///
    /// Absent and empty values are skipped entirely.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            (INPUT_DATA_KEY, self.data.as_deref()),
            (INPUT_ENVIRONMENT_KEY, self.environment.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some((key, value)),
            _ => None,
        })
        .collect()
    }
}

/// A single compilation request. Built by the caller, never mutated by a backend.
///
/// ```
/// use typst_bridge::model::{CompileRequest, OutputRange};
///
/// let request = CompileRequest::new("posts/hello.typ")
///     .with_data(r#"{"target":"html"}"#)
///     .with_output_range(OutputRange::Full);
///
/// assert_eq!(request.output_range(), OutputRange::Full);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    source_path: PathBuf,
    inputs: DynamicInputs,
    output_range: OutputRange,
    pdf_options: Option<PdfOptions>,
}

impl CompileRequest {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            inputs: DynamicInputs::default(),
            output_range: OutputRange::default(),
            pdf_options: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.inputs.data = Some(data.into());
        self
    }

    pub fn with_environment(mut self, environment: Option<String>) -> Self {
        self.inputs.environment = environment;
        self
    }

    pub fn with_output_range(mut self, range: OutputRange) -> Self {
        self.output_range = range;
        self
    }

    /// Per-request PDF options, taking precedence over the backend defaults.
    pub fn with_pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf_options = Some(options);
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The source made absolute against the current directory.
    ///
    /// Both backends compile this path, so a relative source means the same
    /// file whatever the workspace is.
    pub fn resolved_source_path(&self) -> PathBuf {
        absolute_or_keep(&self.source_path)
    }

    pub fn inputs(&self) -> &DynamicInputs {
        &self.inputs
    }

    pub fn output_range(&self) -> OutputRange {
        self.output_range
    }

    pub fn pdf_options(&self) -> Option<&PdfOptions> {
        self.pdf_options.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_follow_fixed_key_order() {
        let inputs = DynamicInputs {
            data: Some("{}".to_string()),
            environment: Some("production".to_string()),
        };

        assert_eq!(
            inputs.pairs(),
            vec![("eleventyData", "{}"), ("environment", "production")]
        );
    }

    #[test]
    fn pairs_skip_absent_and_empty_values() {
        let inputs = DynamicInputs {
            data: Some(String::new()),
            environment: None,
        };
        assert!(inputs.pairs().is_empty());

        let inputs = DynamicInputs {
            data: None,
            environment: Some("dev".to_string()),
        };
        assert_eq!(inputs.pairs(), vec![("environment", "dev")]);
    }

    #[test]
    fn output_range_accepts_legacy_all() {
        let range: OutputRange = serde_yaml::from_str("all").unwrap();
        assert_eq!(range, OutputRange::Full);
        let range: OutputRange = serde_yaml::from_str("body").unwrap();
        assert_eq!(range, OutputRange::Body);
    }

    #[test]
    fn request_defaults_to_body_without_pdf_options() {
        let request = CompileRequest::new("a.typ");
        assert_eq!(request.output_range(), OutputRange::Body);
        assert!(request.pdf_options().is_none());
        assert_eq!(request.source_path(), Path::new("a.typ"));
    }

    #[test]
    fn relative_source_resolves_against_the_current_directory() {
        let cwd = std::env::current_dir().unwrap();
        let request = CompileRequest::new("site/post.typ");
        assert_eq!(request.resolved_source_path(), cwd.join("site/post.typ"));

        let request = CompileRequest::new("/proj/post.typ");
        assert_eq!(request.resolved_source_path(), PathBuf::from("/proj/post.typ"));
    }
}
