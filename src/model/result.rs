// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

/// Rendered output of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Html(String),
    Pdf(Vec<u8>),
}

impl Artifact {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Artifact::Html(html) => html.as_bytes(),
            Artifact::Pdf(bytes) => bytes,
        }
    }
}

/// Uniform result of a compile operation across all backends.
///
/// * `content: None` - the compiler reported a failure that was not raised
///   (native backend outside build mode).
/// * `dependencies: None` - the backend cannot track dependencies. This is
///   different from `Some(vec![])`, which means tracking ran but found nothing
///   usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub content: Option<Artifact>,
    pub dependencies: Option<Vec<PathBuf>>,
}

impl CompileResult {
    /// Result from a backend that tracked the files it touched.
    pub fn tracked(content: Artifact, dependencies: Vec<PathBuf>) -> Self {
        Self {
            content: Some(content),
            dependencies: Some(dependencies),
        }
    }

    /// Result from a backend without dependency tracking.
    pub fn untracked(content: Option<Artifact>) -> Self {
        Self {
            content,
            dependencies: None,
        }
    }
}
