//! Pipeline configuration: schema, bindings, and file loading.
//!
//! - Schema definitions in [`schema`]
//! - Argument bindings in [`binding`]
//! - File discovery and loading in [`loader`]
//! - Layering of local overrides in [`merger`]
//!
//! # Example
//!
//! ```
//! use stepchain::config::{load_merged_config, MissingArgPolicy};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".stepchain");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "missing_arg_policy: fail").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.missing_arg_policy, MissingArgPolicy::Fail);
//! ```

pub mod binding;
pub mod loader;
pub mod merger;
pub mod schema;

pub use binding::{ArgBinding, StepConfig};
pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{MissingArgPolicy, PipelineConfig};
