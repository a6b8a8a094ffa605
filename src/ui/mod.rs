//! Terminal output for the `stepchain` binary.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use stepchain::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_entry("Step1", "[\"hello\"]");
//! assert_eq!(ui.entries()[0].0, "Step1");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, StepchainTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Set the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show that a step is starting (e.g., "[2/3] Step2").
    fn show_progress(&mut self, current: usize, total: usize, name: &str);

    /// Show one result line. Shown in every mode.
    fn show_entry(&mut self, name: &str, values: &str);
}
