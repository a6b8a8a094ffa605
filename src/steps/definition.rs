//! The step capability and its registered form.

use std::fmt;

use crate::value::{TypeTag, Value};

/// A unit of work with a fixed signature.
///
/// Implementations declare their parameter and return types up front; the
/// pipeline resolves one [`Value`] per parameter and hands them to
/// [`Step::invoke`] in order. Closures get an implementation through
/// [`IntoStep`](super::IntoStep); implement this trait directly for steps
/// whose signature is only known at run time.
pub trait Step: Send + Sync {
    /// Declared parameter types, in call order.
    fn parameter_types(&self) -> &[TypeTag];

    /// Declared return types, in output order.
    fn return_types(&self) -> &[TypeTag];

    /// Run the step with one argument per parameter.
    ///
    /// Returns the produced values, or the failure reported by the step body.
    fn invoke(&self, args: Vec<Value>) -> anyhow::Result<Vec<Value>>;
}

/// A step as held by the pipeline registry.
pub struct RegisteredStep {
    name: String,
    position: usize,
    step: Box<dyn Step>,
}

impl RegisteredStep {
    /// Create a registered step at registration `position`.
    pub fn new(name: impl Into<String>, position: usize, step: Box<dyn Step>) -> Self {
        Self {
            name: name.into(),
            position,
            step,
        }
    }

    /// Step name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based registration position, unaffected by reordering.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The underlying step.
    pub fn step(&self) -> &dyn Step {
        self.step.as_ref()
    }
}

impl fmt::Debug for RegisteredStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredStep")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("parameters", &self.step.parameter_types())
            .field("returns", &self.step.return_types())
            .finish()
    }
}
