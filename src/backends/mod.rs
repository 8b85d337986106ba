// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Compiler backend implementations.
//!
//! Every backend implements [`crate::traits::Backend`] and is constructed by
//! [`crate::engine::BackendFactory`] from configuration.
//!
//! # Available Backends
//!
//! ## Subprocess Backend
//! Runs the `typst` CLI once per request:
//! - **System**: `typst` resolved from `PATH`
//! - **Custom**: an explicitly configured executable
//! - **Dependencies**: tracked through a per-invocation JSON manifest
//! - **Use Case**: the default; works with any installed `typst` release
//!
//! ## Native Backend
//! In-process compilation through one long-lived handle:
//! - **Serialized**: calls queue behind a lock and run on the blocking pool
//! - **Dependencies**: not tracked (always `None`)
//! - **Use Case**: no external executable available
//!
//! ## Stub Compilers (Test-Only)
//! In-process compilers for exercising the native backend without Typst:
//! - **StubCompiler**: fixed successful output, records requests
//! - **FailingCompiler**: reports an error for every document
//! - **SerialTracker**: measures overlapping calls
//!
//! # Architecture
//!
//! ```text
//! Config → BackendFactory → Arc<dyn Backend> → compile_html / compile_pdf / query_metadata
//! ```

pub mod cli;
pub mod native;

#[cfg(test)]
pub mod stub;

pub use cli::CliBackend;
pub use native::NativeBackend;
