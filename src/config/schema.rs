//! Pipeline configuration schema.
//!
//! These structs map to the YAML configuration file format. Every field has
//! a default, so an empty file is a valid configuration.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StepchainError;

use super::binding::StepConfig;

/// Root configuration for a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Desired execution order. Steps not listed run afterwards in
    /// registration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub step_order: Vec<String>,

    /// How to fill parameters that have no explicit binding.
    pub missing_arg_policy: MissingArgPolicy,

    /// Steps whose outputs are returned. Empty returns every step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_filter: Vec<String>,

    /// Per-step argument bindings, keyed by step name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub steps: IndexMap<String, StepConfig>,
}

impl PipelineConfig {
    /// Create a config with no reordering, `use_latest` and no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the desired step order.
    pub fn with_step_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Set the missing-argument policy.
    pub fn with_policy(mut self, policy: MissingArgPolicy) -> Self {
        self.missing_arg_policy = policy;
        self
    }

    /// Restrict returned outputs to the named steps.
    pub fn with_output_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_filter = names.into_iter().map(Into::into).collect();
        self
    }

    /// Attach bindings for a step.
    pub fn with_step_config(mut self, step: impl Into<String>, config: StepConfig) -> Self {
        self.steps.insert(step.into(), config);
        self
    }

    /// Bindings configured for `step`, if any.
    pub fn step_config(&self, step: &str) -> Option<&StepConfig> {
        self.steps.get(step)
    }
}

/// Strategy for parameters without an explicit binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MissingArgPolicy {
    /// Take stored values of the parameter's type, oldest first, holding at
    /// the newest once exhausted.
    #[default]
    UseLatest,
    /// Refuse to guess: every unbound parameter is an error.
    Fail,
}

impl MissingArgPolicy {
    /// Configuration name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UseLatest => "use_latest",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for MissingArgPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingArgPolicy {
    type Err = StepchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "use_latest" | "uselatest" => Ok(Self::UseLatest),
            "fail" => Ok(Self::Fail),
            _ => Err(StepchainError::UnknownPolicy {
                policy: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MissingArgPolicy {
    type Error = StepchainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
