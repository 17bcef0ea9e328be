//! TOML-driven plan construction.
//!
//! This module turns a configuration file into composer input without any
//! hand-written fragment code.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert (plugin registry in hand)
//! Vec<FragmentSource>
//!   ↓ compose()
//! EvaluationPlan
//! ```

use crate::plan::FragmentSource;
use crate::rule::PluginRegistry;
use crate::types::Severity;
use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;

/// Errors from reading and loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Fragment validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),
}

/// A loaded configuration: engine settings plus composer input.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Severity threshold for a failing exit status.
    pub fail_on: Severity,
    /// Whether discovery respects .gitignore files.
    pub respect_gitignore: bool,
    /// The ordered fragment sequence, presets spliced as arrays.
    pub sources: Vec<FragmentSource>,
}

/// Parses TOML content and converts it into composer input.
///
/// # Errors
///
/// Returns an error if TOML parsing or fragment validation fails.
pub fn load_from_toml(
    content: &str,
    registry: &PluginRegistry,
) -> Result<LoadedConfig, ConfigError> {
    let dto: dto::ConfigDto = toml::from_str(content)?;
    Ok(loader::load(dto, registry)?)
}

/// Reads and loads a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_file(path: &Path, registry: &PluginRegistry) -> Result<LoadedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_from_toml(&content, registry)
}
