//! Configuration file discovery and loading.
//!
//! A project keeps its pipeline configuration in `.stepchain/config.yml`.
//! An optional `.stepchain/config.local.yml` next to it is merged on top.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::merger::merge_configs;
use crate::config::schema::PipelineConfig;
use crate::error::{Result, StepchainError};

/// Directory holding stepchain configuration inside a project.
pub const CONFIG_DIR: &str = ".stepchain";

/// Paths to configuration files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .stepchain/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .stepchain/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if a project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StepchainError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StepchainError::Io(e)
        }
    })
}

/// Parse YAML content into a [`PipelineConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PipelineConfig> {
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| StepchainError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PipelineConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }
    serde_yaml::from_str(&content).map_err(|e| StepchainError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project config with local overrides merged in.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<PipelineConfig> {
    let paths = ConfigPaths::discover(project_root);
    let project_path = project_root.join(CONFIG_DIR).join("config.yml");

    if !paths.has_project_config() {
        return Err(StepchainError::ConfigNotFound { path: project_path });
    }

    let layers = paths
        .all_existing()
        .into_iter()
        .map(|path| {
            debug!("Loading config layer {}", path.display());
            load_config_value(path)
        })
        .collect::<Result<Vec<_>>>()?;

    serde_yaml::from_value(merge_configs(&layers)).map_err(|e| {
        StepchainError::ConfigParseError {
            path: project_path,
            message: format!("Failed to parse merged config: {}", e),
        }
    })
}

/// Load config with an optional path override.
///
/// An explicit path is loaded on its own, without local overrides.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PipelineConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}
