// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{build_timestamp_now, Config};
use crate::errors::ConfigError;
use crate::model::PdfOptions;
use std::path::{Path, PathBuf};

/// Make `path` absolute against the current directory, keeping it as given
/// when the current directory cannot be read.
///
/// Source files and font directories both follow this rule in every backend.
pub fn absolute_or_keep(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Static configuration owned by a backend for its whole lifetime.
///
/// `executable_path` and `extra_args` only mean something to the subprocess
/// backends. The native backend rejects non-empty `extra_args` when it is
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Absolute project root.
    pub workspace: PathBuf,
    pub font_paths: Vec<PathBuf>,
    /// Serialized build timestamp passed as the `buildDate` input.
    pub build_timestamp: Option<String>,
    pub executable_path: Option<PathBuf>,
    pub extra_args: Vec<String>,
    pub default_pdf_options: Option<PdfOptions>,
}

impl BackendConfig {
    /// A config rooted at `workspace` with no fonts, timestamp or extras.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            font_paths: Vec::new(),
            build_timestamp: None,
            executable_path: None,
            extra_args: Vec::new(),
            default_pdf_options: None,
        }
    }

    /// Make the workspace and font directories absolute against the current
    /// directory. Paths that are already absolute are kept.
    pub fn resolve_paths(mut self) -> Self {
        self.workspace = absolute_or_keep(&self.workspace);
        self.font_paths = self
            .font_paths
            .iter()
            .map(|dir| absolute_or_keep(dir))
            .collect();
        self
    }

    /// Derive the backend config from host configuration.
    ///
    /// The workspace and font directories are made absolute against the
    /// current directory and the build timestamp is taken now.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let workspace =
            std::path::absolute(&cfg.workspace).map_err(|source| ConfigError::Workspace {
                path: cfg.workspace.clone(),
                source,
            })?;

        Ok(Self {
            workspace,
            font_paths: cfg.font_paths.iter().map(|dir| absolute_or_keep(dir)).collect(),
            build_timestamp: Some(build_timestamp_now()),
            executable_path: cfg.executable_path.clone(),
            extra_args: cfg.extra_args.clone(),
            default_pdf_options: cfg.pdf_options.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_resolves_workspace_and_stamps_build() {
        let cfg = Config {
            workspace: PathBuf::from("site"),
            extra_args: vec!["--jobs".to_string(), "2".to_string()],
            ..Config::default()
        };

        let backend = BackendConfig::from_config(&cfg).unwrap();
        assert!(backend.workspace.is_absolute());
        assert!(backend.workspace.ends_with("site"));
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(backend.font_paths, vec![cwd.join("fonts")]);
        assert_eq!(backend.extra_args, vec!["--jobs", "2"]);
        assert!(backend.build_timestamp.is_some());
    }

    #[test]
    fn absolute_workspace_is_kept() {
        let cfg = Config {
            workspace: PathBuf::from("/proj"),
            ..Config::default()
        };
        let backend = BackendConfig::from_config(&cfg).unwrap();
        assert_eq!(backend.workspace, PathBuf::from("/proj"));
    }

    #[test]
    fn relative_fonts_resolve_against_the_current_directory_not_the_workspace() {
        let mut config = BackendConfig::new("/proj/site");
        config.font_paths = vec![PathBuf::from("fonts"), PathBuf::from("/usr/share/fonts")];

        let resolved = config.resolve_paths();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            resolved.font_paths,
            vec![cwd.join("fonts"), PathBuf::from("/usr/share/fonts")]
        );
        assert_eq!(resolved.workspace, PathBuf::from("/proj/site"));
    }
}
