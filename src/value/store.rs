//! Type-indexed pool of values accumulated during a run.

use indexmap::IndexMap;

use crate::error::{Result, StepchainError};

use super::{TypeTag, Value};

/// Values grouped by type, plus the ordered list of initial inputs.
///
/// Both sequences are append-only: an index handed out once stays valid for
/// the lifetime of the store. Types iterate in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: IndexMap<TypeTag, Vec<Value>>,
    initial: Vec<Value>,
}

impl ValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store initial inputs, both by type and in the positional input list.
    pub fn add_inputs<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = Value>,
    {
        for input in inputs {
            self.store_value(input.clone());
            self.initial.push(input);
        }
    }

    /// Store values produced by a step. They are not initial inputs.
    pub fn store_results<I>(&mut self, results: I)
    where
        I: IntoIterator<Item = Value>,
    {
        for result in results {
            self.store_value(result);
        }
    }

    /// Get the value of type `tag` at `index`.
    ///
    /// An index past the end is clamped to the last stored value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no value of that type exists.
    /// Returns `InvalidIndex` if `index` is negative.
    pub fn value_at(&self, tag: &TypeTag, index: isize) -> Result<&Value> {
        let values = match self.values.get(tag) {
            Some(values) if !values.is_empty() => values,
            _ => {
                return Err(StepchainError::NotFound {
                    type_name: tag.name().to_string(),
                })
            }
        };
        if index < 0 {
            return Err(StepchainError::InvalidIndex {
                type_name: tag.name().to_string(),
                index,
            });
        }
        let index = (index as usize).min(values.len() - 1);
        Ok(&values[index])
    }

    /// All stored values of type `tag`, oldest first.
    pub fn values_of(&self, tag: &TypeTag) -> &[Value] {
        self.values.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of stored values of type `tag`.
    pub fn len_of(&self, tag: &TypeTag) -> usize {
        self.values_of(tag).len()
    }

    /// Initial inputs in the order they were added, regardless of type.
    pub fn initial_values(&self) -> &[Value] {
        &self.initial
    }

    /// Types present in the store, in first-insertion order.
    pub fn types(&self) -> impl Iterator<Item = &TypeTag> {
        self.values.keys()
    }

    /// Check if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn store_value(&mut self, value: Value) {
        self.values.entry(value.tag()).or_default().push(value);
    }
}
