// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod mode;
mod request;
mod result;

pub use mode::{BuildMode, FailureAction};
pub(crate) use mode::abort_build;
pub use request::{CompileRequest, DynamicInputs, OutputRange, PdfOptions};
pub use result::{Artifact, CompileResult};
