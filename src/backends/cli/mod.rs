// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Subprocess backend: one `typst` CLI process per request.

pub mod args;
pub mod backend;
pub mod invocation;
pub mod manifest;

pub use backend::CliBackend;
pub use invocation::{Invocation, InvocationOutput, InvocationState, RunningInvocation};
