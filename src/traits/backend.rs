// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CompileError;
use crate::model::{CompileRequest, CompileResult};

/// The capability set every compiler backend provides.
///
/// Callers hold an `Arc<dyn Backend>` produced once by
/// [`crate::engine::BackendFactory`] and never branch on the concrete type.
///
/// Compile failures follow the backend's [`crate::model::BuildMode`]: in build
/// mode the process exits, otherwise the failure is returned (subprocess) or
/// reported as `content: None` (native).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Compile a source file to HTML, honoring the request's output range.
    async fn compile_html(&self, request: &CompileRequest) -> Result<CompileResult, CompileError>;

    /// Compile a source file to PDF bytes.
    async fn compile_pdf(&self, request: &CompileRequest) -> Result<CompileResult, CompileError>;

    /// Run a metadata query and unwrap its first match.
    ///
    /// Never fails: no match and query errors both yield `None`.
    async fn query_metadata(&self, request: &CompileRequest, selector: &str) -> Option<Value>;

    /// Human-readable backend description.
    fn identify(&self) -> String;
}
