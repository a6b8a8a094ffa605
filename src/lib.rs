//! stepchain - Run chains of typed steps that feed each other.
//!
//! A [`Pipeline`] holds named steps (ordinary closures or functions) and a
//! pool of values. Running it calls each step in turn, filling its
//! parameters from the initial inputs and from what earlier steps produced,
//! either by type or through explicit bindings in the [`PipelineConfig`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Pipeline configuration, bindings and file loading
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Argument resolution, ordering and the run loop
//! - [`steps`] - Step trait and closure adapters
//! - [`ui`] - Terminal output
//! - [`value`] - Type-tagged values and the value store
//!
//! # Example
//!
//! ```
//! use stepchain::{ArgBinding, MissingArgPolicy, Pipeline, PipelineConfig, StepConfig};
//!
//! let config = PipelineConfig::new()
//!     .with_policy(MissingArgPolicy::Fail)
//!     .with_step_config("shout", StepConfig::new(vec![Some(ArgBinding::initial(1))]));
//!
//! let mut pipeline = Pipeline::new(config);
//! pipeline.add_step("shout", |s: String| s.to_uppercase());
//! pipeline.add_initial_input(String::from("quiet"));
//! pipeline.add_initial_input(String::from("loud"));
//!
//! let outputs = pipeline.execute().unwrap();
//! assert_eq!(outputs["shout"][0].get::<String>().unwrap(), "LOUD");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod steps;
pub mod ui;
pub mod value;

pub use config::{ArgBinding, MissingArgPolicy, PipelineConfig, StepConfig};
pub use error::{Result, StepchainError};
pub use runner::{Pipeline, PipelineState, RunProgress, StepOutputs};
pub use steps::{IntoStep, Step};
pub use value::{StepValue, TypeTag, Value, ValueStore};
