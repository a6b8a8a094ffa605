//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod config;
pub mod demo;
pub mod dispatcher;

use std::path::Path;

use crate::config::{load_config, PipelineConfig};
use crate::error::{Result, StepchainError};

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

/// Load the pipeline config, or `None` when the project has none.
///
/// A missing explicit `config_path` is still an error.
pub(crate) fn load_optional_config(
    project_root: &Path,
    config_path: Option<&Path>,
) -> Result<Option<PipelineConfig>> {
    match load_config(project_root, config_path) {
        Ok(config) => Ok(Some(config)),
        Err(StepchainError::ConfigNotFound { .. }) if config_path.is_none() => Ok(None),
        Err(e) => Err(e),
    }
}
