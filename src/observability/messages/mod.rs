// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `backend` - backend selection, build aborts, query and dependency results
//! * `subprocess` - compiler process lifecycle and dependency manifests
//! * `native` - in-process compiler diagnostics

use tracing::Span;

pub mod backend;
pub mod native;
pub mod subprocess;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// A span carrying the message's fields, for instrumenting the work it describes.
    fn span(&self) -> Span {
        Span::none()
    }
}
