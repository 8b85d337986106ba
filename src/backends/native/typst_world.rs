// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process compiler over the `typst` crates.
//!
//! Fonts are searched once when the handle is opened. Sources are read from
//! disk on every compile so edits between watch rebuilds are picked up.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;
use typst::diag::{FileError, FileResult, Severity, SourceDiagnostic, Warned};
use typst::foundations::{Bytes, Datetime, Dict, Label, Selector, Str, Value as TypstValue};
use typst::html::HtmlDocument;
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::{LazyHash, PicoStr};
use typst::{Feature, Library, World};
use typst_kit::fonts::{FontSearcher, FontSlot};
use typst_pdf::{PdfOptions as TypstPdfOptions, PdfStandard, PdfStandards};

use super::compiler::{NativeCompiler, NativeOutput, NativeRequest};
use crate::config::BackendConfig;
use crate::errors::ConfigError;
use crate::model::PdfOptions;

/// Long-lived native handle: workspace root plus the searched font set.
pub struct TypstCompiler {
    root: PathBuf,
    book: LazyHash<FontBook>,
    fonts: Vec<FontSlot>,
}

impl TypstCompiler {
    /// Open a handle rooted at the configured workspace.
    pub fn open(config: &BackendConfig) -> Result<Box<dyn NativeCompiler>, ConfigError> {
        if !config.workspace.is_dir() {
            return Err(ConfigError::NativeInit(format!(
                "workspace '{}' is not a directory",
                config.workspace.display()
            )));
        }

        let fonts = FontSearcher::new()
            .include_system_fonts(true)
            .search_with(&config.font_paths);
        tracing::debug!(fonts = fonts.fonts.len(), "native compiler fonts loaded");

        Ok(Box::new(Self {
            root: config.workspace.clone(),
            book: LazyHash::new(fonts.book),
            fonts: fonts.fonts,
        }))
    }

    fn world(&self, request: &NativeRequest) -> Result<DocumentWorld<'_>, String> {
        let vpath = VirtualPath::within_root(&request.main_path, &self.root).ok_or_else(|| {
            format!(
                "{} is outside the workspace {}",
                request.main_path.display(),
                self.root.display()
            )
        })?;

        let library = Library::builder()
            .with_inputs(to_dict(&request.inputs))
            .with_features([Feature::Html].into_iter().collect())
            .build();

        Ok(DocumentWorld {
            handle: self,
            library: LazyHash::new(library),
            main: FileId::new(None, vpath),
            sources: Mutex::new(HashMap::new()),
        })
    }
}

impl NativeCompiler for TypstCompiler {
    fn html(&mut self, request: &NativeRequest) -> NativeOutput<String> {
        let world = match self.world(request) {
            Ok(world) => world,
            Err(message) => return NativeOutput::failure(vec![message]),
        };

        let Warned { output, warnings } = typst::compile::<HtmlDocument>(&world);
        let mut diagnostics = render(&warnings);
        match output.and_then(|document| typst_html::html(&document)) {
            Ok(html) => NativeOutput {
                payload: Some(html),
                diagnostics,
            },
            Err(errors) => {
                diagnostics.extend(render(&errors));
                NativeOutput::failure(diagnostics)
            }
        }
    }

    fn pdf(&mut self, request: &NativeRequest, options: Option<&PdfOptions>) -> NativeOutput<Vec<u8>> {
        let world = match self.world(request) {
            Ok(world) => world,
            Err(message) => return NativeOutput::failure(vec![message]),
        };
        let options = match pdf_options(options) {
            Ok(options) => options,
            Err(message) => return NativeOutput::failure(vec![message]),
        };

        let Warned { output, warnings } = typst::compile::<PagedDocument>(&world);
        let mut diagnostics = render(&warnings);
        match output.and_then(|document| typst_pdf::pdf(&document, &options)) {
            Ok(bytes) => NativeOutput {
                payload: Some(bytes),
                diagnostics,
            },
            Err(errors) => {
                diagnostics.extend(render(&errors));
                NativeOutput::failure(diagnostics)
            }
        }
    }

    /// Only label selectors (`<name>`) are supported.
    fn query(&mut self, request: &NativeRequest, selector: &str) -> Result<Value, String> {
        let label = selector
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .and_then(|name| Label::new(PicoStr::intern(name)))
            .ok_or_else(|| format!("unsupported selector '{selector}', expected <label>"))?;

        let world = self.world(request)?;
        let document = typst::compile::<PagedDocument>(&world)
            .output
            .map_err(|errors| render(&errors).join("\n"))?;

        let matches: Vec<_> = document
            .introspector
            .query(&Selector::Label(label))
            .into_iter()
            .collect();
        serde_json::to_value(&matches).map_err(|error| error.to_string())
    }
}

/// A [`World`] for one compilation of one main file.
struct DocumentWorld<'a> {
    handle: &'a TypstCompiler,
    library: LazyHash<Library>,
    main: FileId,
    sources: Mutex<HashMap<FileId, Source>>,
}

impl DocumentWorld<'_> {
    fn read(&self, id: FileId) -> FileResult<Vec<u8>> {
        if id.package().is_some() {
            return Err(FileError::Other(Some(
                "packages are not available to the native backend".into(),
            )));
        }
        let path = id
            .vpath()
            .resolve(&self.handle.root)
            .ok_or(FileError::AccessDenied)?;
        std::fs::read(&path).map_err(|error| FileError::from_io(error, &path))
    }
}

impl World for DocumentWorld<'_> {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.handle.book
    }

    fn main(&self) -> FileId {
        self.main
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        let mut sources = self
            .sources
            .lock()
            .map_err(|_| FileError::Other(Some("source cache poisoned".into())))?;
        if let Some(source) = sources.get(&id) {
            return Ok(source.clone());
        }

        let bytes = self.read(id)?;
        let text = String::from_utf8(bytes).map_err(|_| FileError::InvalidUtf8)?;
        let text = match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        };
        let source = Source::new(id, text);
        sources.insert(id, source.clone());
        Ok(source)
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        self.read(id).map(Bytes::new)
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.handle.fonts.get(index)?.get()
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let now = time::OffsetDateTime::now_utc();
        let now = match offset {
            Some(hours) => now.checked_add(time::Duration::hours(hours))?,
            None => now,
        };
        Datetime::from_ymd(now.year(), now.month().into(), now.day())
    }
}

fn to_dict(inputs: &BTreeMap<String, String>) -> Dict {
    inputs
        .iter()
        .map(|(key, value)| (Str::from(key.as_str()), TypstValue::Str(Str::from(value.as_str()))))
        .collect()
}

fn pdf_options(options: Option<&PdfOptions>) -> Result<TypstPdfOptions<'static>, String> {
    let Some(standard) = options.and_then(|o| o.standard.as_deref()) else {
        return Ok(TypstPdfOptions::default());
    };

    let standard: PdfStandard = serde_json::from_value(Value::String(standard.to_string()))
        .map_err(|_| format!("unknown PDF standard '{standard}'"))?;
    let standards = PdfStandards::new(&[standard]).map_err(|error| error.to_string())?;
    Ok(TypstPdfOptions {
        standards,
        ..TypstPdfOptions::default()
    })
}

fn render(diagnostics: &[SourceDiagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .map(|diagnostic| {
            let severity = match diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let mut line = format!("{severity}: {}", diagnostic.message);
            for hint in &diagnostic.hints {
                line.push_str(&format!("\n  hint: {hint}"));
            }
            line
        })
        .collect()
}
