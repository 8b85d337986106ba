// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Helpers for a static-site host: page data, target dispatch and
//! frontmatter-driven per-file data.

mod page;
mod target;

pub use page::{environment_from_env, page_data, page_request, render, PageData};
pub use target::Target;
