// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Normalizes raw compiler output into the shapes callers consume.

mod html;
mod metadata;

pub use html::{extract_body, shape_html};
pub use metadata::unwrap_first_match;
