// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Composition of `typst` CLI arguments.
//!
//! Order matters: the CLI applies last-wins semantics, so user supplied
//! `extra_args` always come last and can override anything generated here.

use crate::config::consts::INPUT_BUILD_DATE_KEY;
use crate::config::BackendConfig;
use crate::model::{CompileRequest, PdfOptions};
use std::ffi::OsString;
use std::path::Path;

/// Build the shared argument list for one invocation.
///
/// 1. `--font-path` per font directory, in configured order
/// 2. `--root <workspace>`
/// 3. `--input key=value` per populated dynamic input
/// 4. `--pdf-standard` when `pdf` names one
/// 5. `--input buildDate=...` when configured
/// 6. `--deps <manifest> --deps-format json` when a manifest path is given
/// 7. `extra_args`, verbatim
pub fn compose(
    config: &BackendConfig,
    request: &CompileRequest,
    pdf: Option<&PdfOptions>,
    manifest: Option<&Path>,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();

    for font_path in &config.font_paths {
        args.push("--font-path".into());
        args.push(font_path.into());
    }

    args.push("--root".into());
    args.push(config.workspace.as_os_str().to_owned());

    for (key, value) in request.inputs().pairs() {
        args.push("--input".into());
        args.push(format!("{key}={value}").into());
    }

    if let Some(standard) = pdf.and_then(|options| options.standard.as_deref()) {
        args.push("--pdf-standard".into());
        args.push(standard.into());
    }

    if let Some(timestamp) = &config.build_timestamp {
        args.push("--input".into());
        args.push(format!("{INPUT_BUILD_DATE_KEY}={timestamp}").into());
    }

    if let Some(manifest) = manifest {
        args.push("--deps".into());
        args.push(manifest.into());
        args.push("--deps-format".into());
        args.push("json".into());
    }

    args.extend(config.extra_args.iter().map(OsString::from));
    args
}
