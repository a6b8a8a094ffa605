//! Argument resolution for a single step.
//!
//! A fresh [`ArgumentResolver`] is built for every step, so the `use_latest`
//! pick counters start at zero for each step and never leak into the next.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{ArgBinding, MissingArgPolicy, StepConfig};
use crate::error::{Result, StepchainError};
use crate::value::{TypeTag, Value, ValueStore};

use super::filter::StepOutputs;

/// Resolves the arguments of one step from the values gathered so far.
#[derive(Debug)]
pub struct ArgumentResolver<'a> {
    step: &'a str,
    store: &'a ValueStore,
    outputs: &'a StepOutputs,
    policy: MissingArgPolicy,
    pick_counters: HashMap<TypeTag, usize>,
}

impl<'a> ArgumentResolver<'a> {
    /// Create a resolver for `step` with all pick counters at zero.
    pub fn new(
        step: &'a str,
        store: &'a ValueStore,
        outputs: &'a StepOutputs,
        policy: MissingArgPolicy,
    ) -> Self {
        Self {
            step,
            store,
            outputs,
            policy,
            pick_counters: HashMap::new(),
        }
    }

    /// Resolve every parameter left to right.
    ///
    /// Stops at the first failure; values resolved before it are dropped.
    pub fn resolve_all(
        &mut self,
        parameters: &[TypeTag],
        config: Option<&StepConfig>,
    ) -> Result<Vec<Value>> {
        parameters
            .iter()
            .enumerate()
            .map(|(position, param)| {
                let binding = config.and_then(|c| c.binding_for(position));
                self.resolve(param, binding)
            })
            .collect()
    }

    /// Resolve one parameter of type `param`, honoring its binding if present.
    pub fn resolve(&mut self, param: &TypeTag, binding: Option<&ArgBinding>) -> Result<Value> {
        match binding {
            None | Some(ArgBinding::Default) => self.resolve_default(param),
            Some(ArgBinding::Initial { index }) => self.resolve_initial(param, *index),
            Some(ArgBinding::FunctionOutput { step, index }) => {
                self.resolve_function_output(param, step, *index)
            }
        }
    }

    /// Current pick counter for `tag`.
    pub fn pick_counter(&self, tag: &TypeTag) -> usize {
        self.pick_counters.get(tag).copied().unwrap_or(0)
    }

    fn resolve_default(&mut self, param: &TypeTag) -> Result<Value> {
        match self.policy {
            MissingArgPolicy::UseLatest => {
                let index = self.pick_counter(param);
                let value = self.store.value_at(param, index as isize)?.clone();
                if index + 1 < self.store.len_of(param) {
                    self.pick_counters.insert(*param, index + 1);
                }
                debug!(
                    "Step {:?}: picked {} #{} by type",
                    self.step,
                    param.name(),
                    index
                );
                Ok(value)
            }
            MissingArgPolicy::Fail => Err(StepchainError::MissingArgument {
                step: self.step.to_string(),
                type_name: param.name().to_string(),
            }),
        }
    }

    fn resolve_initial(&self, param: &TypeTag, index: isize) -> Result<Value> {
        let initial = self.store.initial_values();
        let value = checked_index(index, initial.len())
            .map(|i| &initial[i])
            .ok_or_else(|| StepchainError::IndexOutOfRange {
                step: self.step.to_string(),
                origin: "initial input".to_string(),
                index,
                available: initial.len(),
            })?;
        self.check_assignable(param, value, || format!("initial input {}", index))
    }

    fn resolve_function_output(
        &self,
        param: &TypeTag,
        producer: &str,
        index: isize,
    ) -> Result<Value> {
        let outputs = self
            .outputs
            .get(producer)
            .ok_or_else(|| StepchainError::UnknownProducer {
                step: self.step.to_string(),
                producer: producer.to_string(),
            })?;
        let value = checked_index(index, outputs.len())
            .map(|i| &outputs[i])
            .ok_or_else(|| StepchainError::IndexOutOfRange {
                step: self.step.to_string(),
                origin: format!("output of step '{}'", producer),
                index,
                available: outputs.len(),
            })?;
        self.check_assignable(param, value, || {
            format!("output {} of step '{}'", index, producer)
        })
    }

    fn check_assignable(
        &self,
        param: &TypeTag,
        value: &Value,
        origin: impl FnOnce() -> String,
    ) -> Result<Value> {
        if param.accepts(&value.tag()) {
            Ok(value.clone())
        } else {
            Err(StepchainError::TypeMismatch {
                step: self.step.to_string(),
                origin: origin(),
                actual: value.type_name().to_string(),
                expected: param.name().to_string(),
            })
        }
    }
}

fn checked_index(index: isize, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}
