//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{MissingArgPolicy, PipelineConfig};

/// stepchain - Run chains of typed steps that feed each other.
#[derive(Debug, Parser)]
#[command(name = "stepchain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .stepchain/config.yml)
    #[arg(short, long, global = true, env = "STEPCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show per-step progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the demo pipeline (default if no command specified)
    Demo(DemoArgs),

    /// Show resolved configuration
    Config(ConfigArgs),
}

/// Arguments for the `demo` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DemoArgs {
    /// Step execution order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub order: Vec<String>,

    /// Only print outputs of these steps (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub filter: Vec<String>,

    /// How to fill unbound parameters: use_latest or fail
    #[arg(long)]
    pub policy: Option<MissingArgPolicy>,

    /// Initial input (repeatable)
    #[arg(long = "input", value_name = "TEXT")]
    pub inputs: Vec<String>,
}

impl DemoArgs {
    /// Override `config` with every flag that was given.
    pub fn apply_to(&self, config: &mut PipelineConfig) {
        if !self.order.is_empty() {
            config.step_order = self.order.clone();
        }
        if !self.filter.is_empty() {
            config.output_filter = self.filter.clone();
        }
        if let Some(policy) = self.policy {
            config.missing_arg_policy = policy;
        }
    }
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
