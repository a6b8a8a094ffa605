//! Error types for stepchain operations.
//!
//! This module defines [`StepchainError`], the error type returned by every
//! pipeline operation, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Argument resolution failures have one variant each so callers can match on them
//! - Failures raised inside a step body are carried as `anyhow::Error` in [`StepchainError::StepFailed`]
//! - Every error ends the run; there is no retry and no rollback

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stepchain operations.
#[derive(Debug, Error)]
pub enum StepchainError {
    /// No values of the requested type exist in the store.
    #[error("No values found for type {type_name}")]
    NotFound { type_name: String },

    /// A negative index was requested from the store.
    #[error("Invalid index {index} (negative) for type {type_name}")]
    InvalidIndex { type_name: String, index: isize },

    /// An explicit binding pointed outside the available values.
    #[error("Step '{step}': {origin} index {index} out of range ({available} available)")]
    IndexOutOfRange {
        step: String,
        origin: String,
        index: isize,
        available: usize,
    },

    /// A bound value cannot be passed as the declared parameter type.
    #[error("Step '{step}': {origin} has type {actual}, not assignable to {expected}")]
    TypeMismatch {
        step: String,
        origin: String,
        actual: String,
        expected: String,
    },

    /// Default resolution was needed while the policy is `fail`.
    #[error("Step '{step}': missing argument for type {type_name} (policy=fail)")]
    MissingArgument { step: String, type_name: String },

    /// A `function_output` binding names a step that has not run.
    #[error("Step '{step}': step '{producer}' has no recorded outputs")]
    UnknownProducer { step: String, producer: String },

    /// The configured missing-argument policy is not recognized.
    #[error("Unknown missing-argument policy '{policy}' (expected use_latest or fail)")]
    UnknownPolicy { policy: String },

    /// The step body itself reported an error.
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for stepchain operations.
pub type Result<T> = std::result::Result<T, StepchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_type() {
        let err = StepchainError::NotFound {
            type_name: "alloc::string::String".into(),
        };
        assert!(err.to_string().contains("alloc::string::String"));
    }

    #[test]
    fn invalid_index_displays_index() {
        let err = StepchainError::InvalidIndex {
            type_name: "i64".into(),
            index: -3,
        };
        let msg = err.to_string();
        assert!(msg.contains("-3"));
        assert!(msg.contains("i64"));
    }

    #[test]
    fn index_out_of_range_displays_bounds() {
        let err = StepchainError::IndexOutOfRange {
            step: "parse".into(),
            origin: "initial input".into(),
            index: 4,
            available: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("parse"));
        assert!(msg.contains("initial input index 4"));
        assert!(msg.contains("2 available"));
    }

    #[test]
    fn type_mismatch_displays_both_types() {
        let err = StepchainError::TypeMismatch {
            step: "sum".into(),
            origin: "initial input 0".into(),
            actual: "alloc::string::String".into(),
            expected: "i64".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("alloc::string::String"));
        assert!(msg.contains("not assignable to i64"));
    }

    #[test]
    fn missing_argument_mentions_policy() {
        let err = StepchainError::MissingArgument {
            step: "render".into(),
            type_name: "u32".into(),
        };
        assert!(err.to_string().contains("policy=fail"));
    }

    #[test]
    fn unknown_producer_displays_producer() {
        let err = StepchainError::UnknownProducer {
            step: "render".into(),
            producer: "fetch".into(),
        };
        assert!(err.to_string().contains("'fetch' has no recorded outputs"));
    }

    #[test]
    fn unknown_policy_displays_name() {
        let err = StepchainError::UnknownPolicy {
            policy: "newest".into(),
        };
        assert!(err.to_string().contains("newest"));
    }

    #[test]
    fn step_failed_keeps_source() {
        let err = StepchainError::StepFailed {
            step: "load".into(),
            source: anyhow::anyhow!("disk full"),
        };
        assert!(err.to_string().contains("disk full"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = StepchainError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: StepchainError = io_err.into();
        assert!(matches!(err, StepchainError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(StepchainError::UnknownPolicy {
                policy: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
