// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process backend.
//!
//! [`NativeBackend`] drives any [`NativeCompiler`]. The real Typst binding,
//! [`TypstCompiler`], is only built with the `typst-native` feature.

mod backend;
mod compiler;
#[cfg(feature = "typst-native")]
mod typst_world;

pub use backend::NativeBackend;
pub use compiler::{NativeCompiler, NativeOutput, NativeRequest};
#[cfg(feature = "typst-native")]
pub use typst_world::TypstCompiler;
