//! Step execution orchestration.
//!
//! - [`Pipeline`] - Registration, ordering and the run loop
//! - [`ArgumentResolver`] - Fills one step's parameters
//! - [`order_steps`] - Applies a partial configured order
//! - [`filter_outputs`] - Narrows the returned output map

pub mod filter;
pub mod order;
pub mod pipeline;
pub mod resolver;

pub use filter::{filter_outputs, StepOutputs};
pub use order::{order_steps, StepOrdering};
pub use pipeline::{Pipeline, PipelineState, RunProgress};
pub use resolver::ArgumentResolver;
