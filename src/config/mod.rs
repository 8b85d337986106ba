// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod backend;
mod build_date;
mod loader;

pub mod consts;

pub use backend::{absolute_or_keep, BackendConfig};
pub use build_date::{build_timestamp, build_timestamp_now};
pub use loader::{load_config, BackendKind, Config};
