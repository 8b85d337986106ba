// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::Arc;

use crate::backends::native::NativeCompiler;
use crate::backends::{CliBackend, NativeBackend};
use crate::config::consts::DEFAULT_SYSTEM_EXECUTABLE;
use crate::config::{BackendConfig, BackendKind, Config};
use crate::errors::ConfigError;
use crate::model::BuildMode;
use crate::observability::messages::backend::{BackendSelected, ExecutableNotFound};
use crate::observability::messages::StructuredLog;
use crate::traits::Backend;

/// Factory for creating compiler backends from configuration.
///
/// This is the only place that names concrete backend types.
pub struct BackendFactory;

impl BackendFactory {
    /// Create the backend described by the host configuration, running in `mode`.
    pub fn from_config(cfg: &Config, mode: BuildMode) -> Result<Arc<dyn Backend>, ConfigError> {
        let backend_config = BackendConfig::from_config(cfg)?;
        Self::create(cfg.backend, backend_config, mode)
    }

    /// Validate `config` for `kind` and construct exactly one backend.
    pub fn create(
        kind: BackendKind,
        mut config: BackendConfig,
        mode: BuildMode,
    ) -> Result<Arc<dyn Backend>, ConfigError> {
        let backend: Arc<dyn Backend> = match kind {
            BackendKind::Native => Arc::new(NativeBackend::new(config, mode, open_native)?),
            BackendKind::SubprocessSystem => {
                // A configured path belongs to the custom kind only.
                config.executable_path = None;
                if let Err(error) = which::which(DEFAULT_SYSTEM_EXECUTABLE) {
                    ExecutableNotFound {
                        executable: Path::new(DEFAULT_SYSTEM_EXECUTABLE),
                        error: &error,
                    }
                    .log();
                }
                Arc::new(CliBackend::new(config, mode))
            }
            BackendKind::SubprocessCustom => {
                let has_path = config
                    .executable_path
                    .as_ref()
                    .is_some_and(|path| !path.as_os_str().is_empty());
                if !has_path {
                    return Err(ConfigError::MissingExecutablePath { kind });
                }
                Arc::new(CliBackend::new(config, mode))
            }
        };

        BackendSelected {
            kind: kind.as_str(),
            description: &backend.identify(),
        }
        .log();
        Ok(backend)
    }
}

#[cfg(feature = "typst-native")]
fn open_native(config: &BackendConfig) -> Result<Box<dyn NativeCompiler>, ConfigError> {
    crate::backends::native::TypstCompiler::open(config)
}

#[cfg(not(feature = "typst-native"))]
fn open_native(_config: &BackendConfig) -> Result<Box<dyn NativeCompiler>, ConfigError> {
    Err(ConfigError::NativeUnavailable)
}
