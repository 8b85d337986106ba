// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod compile;
mod config;

pub use compile::CompileError;
pub use config::ConfigError;
