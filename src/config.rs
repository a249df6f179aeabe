// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Configuration file loading.
//!
//! Search order:
//! 1. explicit path (a missing file is an error)
//! 2. `topodraw/config.toml` relative to the working directory
//! 3. the platform config directory
//! 4. built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::layout::Direction;
use crate::output::OutputDir;
use crate::render::{ImageFormat, RenderStyle};

const LOCAL_CONFIG: &str = "topodraw/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse TOML configuration {path:?}: {source}")]
    Parse { path: PathBuf, source: Box<toml::de::Error> },

    #[error("missing configuration file: {0:?}")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Image directory; defaults to `<temp>/architecture_diagrams`.
    pub directory: Option<PathBuf>,
    pub format: ImageFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub layout: LayoutConfig,
    pub style: RenderStyle,
}

impl AppConfig {
    pub fn output_dir(&self) -> OutputDir {
        self.output.directory.clone().map(OutputDir::new).unwrap_or_default()
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        directory: Option<PathBuf>,
        format: Option<ImageFormat>,
        direction: Option<Direction>,
    ) -> Self {
        if directory.is_some() {
            self.output.directory = directory;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
        if let Some(direction) = direction {
            self.layout.direction = direction;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.style.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "style.scale must be greater than zero, got {scale}"
            )));
        }
        if self.style.font_family.trim().is_empty() {
            return Err(ConfigError::Validation("style.font_family must not be empty".to_owned()));
        }
        Ok(())
    }
}

/// Finds and loads the configuration.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "loading configuration from explicit path");
        return load_config_file(path);
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.exists() {
        info!(path = local.display().to_string(); "loading configuration from local path");
        return load_config_file(local);
    }

    if let Some(dirs) = ProjectDirs::from("com", "topodraw", "topodraw") {
        let system = dirs.config_dir().join("config.toml");
        if system.exists() {
            info!(path = system.display().to_string(); "loading configuration from system path");
            return load_config_file(&system);
        }
        debug!(path = system.display().to_string(); "system configuration file not found");
    } else {
        debug!("could not determine platform config directory");
    }

    debug!("no configuration file found, using defaults");
    Ok(AppConfig::default())
}

pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    config.validate()?;
    Ok(config)
}
