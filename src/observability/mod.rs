// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic and operational log line emitted by the backends is a
//! message type in [`messages`]. Each one implements `Display` for the human
//! readable text and [`messages::StructuredLog`] for emitting a `tracing`
//! event with structured fields at the message's own level.
//!
//! # Usage
//!
//! ```rust
//! use typst_bridge::observability::messages::backend::QueryFailed;
//! use typst_bridge::observability::messages::StructuredLog;
//! use std::path::Path;
//!
//! let msg = QueryFailed {
//!     source_path: Path::new("posts/hello.typ"),
//!     selector: "<11typst:frontmatter>",
//!     reason: "no match",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
