//! Steps: named units of work with a declared signature.
//!
//! - [`Step`] - The capability the pipeline invokes
//! - [`IntoStep`] - Turns closures and functions into steps
//! - [`IntoOutputs`] - Return types a step closure may have
//! - [`RegisteredStep`] - A named step held by the pipeline
//!
//! # Example
//!
//! ```
//! use stepchain::steps::{IntoStep, Step};
//! use stepchain::{TypeTag, Value};
//!
//! let step = (|s: String| s.trim().len()).into_step();
//! assert_eq!(step.parameter_types(), &[TypeTag::of::<String>()]);
//!
//! let outputs = step.invoke(vec![Value::new(" hi ".to_string())]).unwrap();
//! assert_eq!(outputs[0].get::<usize>(), Some(2));
//! ```

pub mod adapter;
pub mod definition;

pub use adapter::{IntoOutputs, IntoStep};
pub use definition::{RegisteredStep, Step};
