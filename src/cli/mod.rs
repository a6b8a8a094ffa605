//! Command-line interface for stepchain.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigArgs, DemoArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
