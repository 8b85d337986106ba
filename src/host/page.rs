// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;

use super::Target;
use crate::config::consts::ENVIRONMENT_ENV;
use crate::errors::CompileError;
use crate::model::{CompileRequest, CompileResult, OutputRange};
use crate::traits::Backend;

/// Page metadata handed to a document as its `eleventyData` input.
///
/// The crate never looks inside `metadata`, `page` or `links`; they are
/// passed through as the host supplied them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub metadata: Value,
    pub page: Value,
    pub target: Option<Target>,
    pub links: Value,
    pub output_file_extension: Option<String>,
}

impl PageData {
    /// Page data for rendering to `target`.
    pub fn for_target(target: Target) -> Self {
        Self {
            target: Some(target),
            output_file_extension: Some(target.output_file_extension().to_string()),
            ..Self::default()
        }
    }
}

/// Environment name from `NODE_ENV`, if set and non-empty.
pub fn environment_from_env() -> Option<String> {
    std::env::var(ENVIRONMENT_ENV)
        .ok()
        .filter(|value| !value.is_empty())
}

/// Build the compile request for one page.
pub fn page_request(
    source: &Path,
    page: &PageData,
    range: OutputRange,
) -> Result<CompileRequest, serde_json::Error> {
    Ok(CompileRequest::new(source)
        .with_data(serde_json::to_string(page)?)
        .with_environment(environment_from_env())
        .with_output_range(range))
}

/// Compile a request to the given target.
pub async fn render(
    backend: &dyn Backend,
    target: Target,
    request: &CompileRequest,
) -> Result<CompileResult, CompileError> {
    match target {
        Target::Html => backend.compile_html(request).await,
        Target::Pdf => backend.compile_pdf(request).await,
    }
}

/// Per-file data: the default `targets`, overridden by whatever the
/// document's frontmatter metadata declares.
///
/// Frontmatter that is not an object is ignored.
pub async fn page_data(
    backend: &dyn Backend,
    source: &Path,
    default_targets: &[Target],
    selector: &str,
) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("targets".to_string(), json!(default_targets));

    let request = CompileRequest::new(source)
        .with_data(json!({ "target": "query" }).to_string())
        .with_environment(environment_from_env());

    match backend.query_metadata(&request, selector).await {
        Some(Value::Object(frontmatter)) => data.extend(frontmatter),
        Some(other) => {
            tracing::debug!(
                source_path = %source.display(),
                frontmatter = %other,
                "ignoring frontmatter that is not an object"
            );
        }
        None => {}
    }
    data
}
