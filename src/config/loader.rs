// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_FONT_DIR, DEFAULT_WORKSPACE};
use crate::errors::ConfigError;
use crate::host::Target;
use crate::model::{BuildMode, OutputRange, PdfOptions};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Host configuration for the Typst integration.
///
/// Loaded once at startup, typically from a YAML file. Every field is
/// optional.
///
/// # Fields
/// * `backend` - Which compiler backend to construct
/// * `executable_path` - Compiler executable (required for `subprocess-custom`)
/// * `workspace` - Project root passed to the compiler
/// * `font_paths` - Extra font directories, searched in order
/// * `pdf_options` - Default PDF export options
/// * `extra_args` - Extra CLI arguments, appended last (subprocess backends only)
/// * `html_output_range` - `body` (default) or `full`
/// * `targets` - Default output targets for each source file
/// * `mode` - `build` (fail fast) or `watch` (fail soft, default)
///
/// # Example
/// ```yaml
/// backend: subprocess-custom
/// executable_path: /opt/typst/bin/typst
/// workspace: site
/// font_paths: [fonts, /usr/share/fonts/noto]
/// pdf_options:
///   standard: a-2b
/// extra_args: ["--ignore-system-fonts"]
/// targets: [html, pdf]
/// mode: build
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub executable_path: Option<PathBuf>,
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,
    #[serde(default = "default_font_paths")]
    pub font_paths: Vec<PathBuf>,
    #[serde(default)]
    pub pdf_options: Option<PdfOptions>,
    #[serde(default)]
    pub extra_args: Vec<String>,
    #[serde(default)]
    pub html_output_range: OutputRange,
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub mode: BuildMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            executable_path: None,
            workspace: default_workspace(),
            font_paths: default_font_paths(),
            pdf_options: None,
            extra_args: Vec::new(),
            html_output_range: OutputRange::default(),
            targets: default_targets(),
            mode: BuildMode::default(),
        }
    }
}

fn default_workspace() -> PathBuf {
    PathBuf::from(DEFAULT_WORKSPACE)
}

fn default_font_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_FONT_DIR)]
}

fn default_targets() -> Vec<Target> {
    vec![Target::Html, Target::Pdf]
}

/// Compiler backend implementation.
///
/// # Variants
/// * `Native` - In-process Typst compiler (needs the `typst-native` feature)
/// * `SubprocessSystem` - `typst` CLI found on `PATH`
/// * `SubprocessCustom` - `typst` CLI at a configured path
///
/// The legacy plugin names (`typst-ts-node`, `typst-cli-system`,
/// `typst-cli-custom`) are accepted as aliases.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[serde(alias = "typst-ts-node")]
    Native,
    #[default]
    #[serde(alias = "typst-cli-system")]
    SubprocessSystem,
    #[serde(alias = "typst-cli-custom")]
    SubprocessCustom,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Native => "native",
            BackendKind::SubprocessSystem => "subprocess-system",
            BackendKind::SubprocessCustom => "subprocess-custom",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" | "typst-ts-node" => Ok(BackendKind::Native),
            "subprocess-system" | "typst-cli-system" => Ok(BackendKind::SubprocessSystem),
            "subprocess-custom" | "typst-cli-custom" => Ok(BackendKind::SubprocessCustom),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Load a config from a YAML or TOML file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
        }
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
backend: subprocess-custom
executable_path: /opt/typst/bin/typst
workspace: site
font_paths: [fonts, extra-fonts]
extra_args: ["--ignore-system-fonts"]
mode: build
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.backend, BackendKind::SubprocessCustom);
        assert_eq!(cfg.executable_path, Some(PathBuf::from("/opt/typst/bin/typst")));
        assert_eq!(cfg.font_paths.len(), 2);
        assert_eq!(cfg.extra_args, vec!["--ignore-system-fonts"]);
        assert_eq!(cfg.mode, BuildMode::Build);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(cfg.backend, BackendKind::SubprocessSystem);
        assert_eq!(cfg.workspace, PathBuf::from("."));
        assert_eq!(cfg.font_paths, vec![PathBuf::from("fonts")]);
        assert_eq!(cfg.html_output_range, OutputRange::Body);
        assert_eq!(cfg.targets, vec![Target::Html, Target::Pdf]);
        assert_eq!(cfg.mode, BuildMode::Watch);
        assert!(cfg.pdf_options.is_none());
    }

    #[test]
    fn accepts_legacy_backend_names() {
        let cfg: Config = serde_yaml::from_str("backend: typst-ts-node").unwrap();
        assert_eq!(cfg.backend, BackendKind::Native);
        let cfg: Config = serde_yaml::from_str("backend: typst-cli-custom").unwrap();
        assert_eq!(cfg.backend, BackendKind::SubprocessCustom);
    }

    #[test]
    fn backend_kind_from_str() {
        assert_eq!("native".parse::<BackendKind>().unwrap(), BackendKind::Native);
        assert_eq!(
            "typst-cli-system".parse::<BackendKind>().unwrap(),
            BackendKind::SubprocessSystem
        );

        let err = "pandoc".parse::<BackendKind>().unwrap_err();
        assert!(err.to_string().contains("Unknown backend type: pandoc"));
    }

    #[test]
    fn load_yaml_and_toml_files() {
        let dir = TempDir::new().unwrap();

        let yaml_path = dir.path().join("typst.yaml");
        std::fs::write(&yaml_path, "backend: native\npdf_options:\n  standard: a-2b\n").unwrap();
        let cfg = load_config(&yaml_path).unwrap();
        assert_eq!(cfg.backend, BackendKind::Native);
        assert_eq!(cfg.pdf_options.unwrap().standard.as_deref(), Some("a-2b"));

        let toml_path = dir.path().join("typst.toml");
        std::fs::write(
            &toml_path,
            "backend = \"subprocess-system\"\nhtml_output_range = \"full\"\n",
        )
        .unwrap();
        let cfg = load_config(&toml_path).unwrap();
        assert_eq!(cfg.html_output_range, OutputRange::Full);
    }

    #[test]
    fn load_rejects_unknown_extension_and_bad_yaml() {
        let dir = TempDir::new().unwrap();

        let ini = dir.path().join("typst.ini");
        std::fs::write(&ini, "backend=native").unwrap();
        assert!(matches!(
            load_config(&ini),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "backend: [not, a, kind]").unwrap();
        assert!(matches!(load_config(&bad), Err(ConfigError::Parse { .. })));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(load_config(&missing), Err(ConfigError::Read { .. })));
    }
}
