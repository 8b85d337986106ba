// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // compiler backends (cli + native)
pub mod config;     // config loading + backend config
pub mod engine;     // backend selection
pub mod errors;     // error handling
pub mod host;       // host pipeline glue
pub mod model;      // requests, results, build mode
pub mod observability;
pub mod output;     // html body extraction + query unwrapping
pub mod traits;     // unified abstractions
