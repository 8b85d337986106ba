// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::native::{NativeCompiler, NativeOutput, NativeRequest};
use crate::model::PdfOptions;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// An in-process compiler that always succeeds with fixed output.
pub struct StubCompiler {
    pub html: String,
    pub pdf: Vec<u8>,
    pub query: Result<Value, String>,
    requests: Arc<Mutex<Vec<NativeRequest>>>,
    pdf_standards: Arc<Mutex<Vec<Option<String>>>>,
}

impl Default for StubCompiler {
    fn default() -> Self {
        Self {
            html: r#"<html><body class="x">Hi</body></html>"#.to_string(),
            pdf: b"%PDF-1.7".to_vec(),
            query: Ok(Value::Array(Vec::new())),
            requests: Arc::default(),
            pdf_standards: Arc::default(),
        }
    }
}

impl StubCompiler {
    /// A stub whose queries answer with `query`.
    pub fn with_query(query: Result<Value, String>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    /// Every request the compiler has seen, shared with the caller.
    pub fn requests(&self) -> Arc<Mutex<Vec<NativeRequest>>> {
        Arc::clone(&self.requests)
    }

    /// The PDF standard passed to each `pdf` call.
    pub fn pdf_standards(&self) -> Arc<Mutex<Vec<Option<String>>>> {
        Arc::clone(&self.pdf_standards)
    }

    fn record(&self, request: &NativeRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
    }
}

impl NativeCompiler for StubCompiler {
    fn html(&mut self, request: &NativeRequest) -> NativeOutput<String> {
        self.record(request);
        NativeOutput::success(self.html.clone())
    }

    fn pdf(&mut self, request: &NativeRequest, options: Option<&PdfOptions>) -> NativeOutput<Vec<u8>> {
        self.record(request);
        if let Ok(mut standards) = self.pdf_standards.lock() {
            standards.push(options.and_then(|o| o.standard.clone()));
        }
        NativeOutput::success(self.pdf.clone())
    }

    fn query(&mut self, request: &NativeRequest, _selector: &str) -> Result<Value, String> {
        self.record(request);
        self.query.clone()
    }
}

/// A compiler that reports an error for every document.
pub struct FailingCompiler;

impl NativeCompiler for FailingCompiler {
    fn html(&mut self, _request: &NativeRequest) -> NativeOutput<String> {
        NativeOutput::failure(vec!["error: unknown variable: x".to_string()])
    }

    fn pdf(&mut self, _request: &NativeRequest, _options: Option<&PdfOptions>) -> NativeOutput<Vec<u8>> {
        NativeOutput::failure(vec!["error: unknown variable: x".to_string()])
    }

    fn query(&mut self, _request: &NativeRequest, _selector: &str) -> Result<Value, String> {
        Err("error: unknown variable: x".to_string())
    }
}

/// A slow compiler that records the highest number of overlapping calls.
#[derive(Default)]
pub struct SerialTracker {
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl SerialTracker {
    pub fn peak(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak)
    }

    fn occupy(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(10));
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl NativeCompiler for SerialTracker {
    fn html(&mut self, _request: &NativeRequest) -> NativeOutput<String> {
        self.occupy();
        NativeOutput::success("<p>tracked</p>".to_string())
    }

    fn pdf(&mut self, _request: &NativeRequest, _options: Option<&PdfOptions>) -> NativeOutput<Vec<u8>> {
        self.occupy();
        NativeOutput::success(Vec::new())
    }

    fn query(&mut self, _request: &NativeRequest, _selector: &str) -> Result<Value, String> {
        self.occupy();
        Ok(Value::Null)
    }
}
