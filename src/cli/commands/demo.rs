//! Demo command implementation.
//!
//! The `stepchain demo` command runs a two-step pipeline: `Step1` produces a
//! greeting, `Step2` measures a string. Project configuration and flags
//! decide ordering, argument policy and which outputs get printed.

use std::path::{Path, PathBuf};

use crate::cli::args::DemoArgs;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::runner::{Pipeline, RunProgress};
use crate::ui::UserInterface;
use crate::value::Value;

use super::dispatcher::{Command, CommandResult};
use super::load_optional_config;

/// Initial inputs used when no `--input` is given.
pub const DEFAULT_INPUTS: [&str; 2] = ["extra input 1", "extra input 2"];

/// Build the demo pipeline without inputs.
pub fn demo_pipeline(config: PipelineConfig) -> Pipeline {
    let mut pipeline = Pipeline::new(config);
    pipeline.add_step("Step1", || String::from("Hello from Step1!"));
    pipeline.add_step("Step2", |input: String| input.trim().len());
    pipeline
}

/// The demo command implementation.
pub struct DemoCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: DemoArgs,
}

impl DemoCommand {
    /// Create a new demo command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: DemoArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    fn inputs(&self) -> Vec<Value> {
        if self.args.inputs.is_empty() {
            DEFAULT_INPUTS
                .iter()
                .map(|s| Value::new(s.to_string()))
                .collect()
        } else {
            self.args.inputs.iter().cloned().map(Value::new).collect()
        }
    }
}

impl Command for DemoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut config = load_optional_config(&self.project_root, self.config_path.as_deref())?
            .unwrap_or_default();
        self.args.apply_to(&mut config);

        let mut pipeline = demo_pipeline(config);
        pipeline.add_initial_inputs(self.inputs());

        ui.show_header("stepchain demo");
        let result = pipeline.execute_with_progress(|event| {
            if let RunProgress::StepStarting { name, index, total } = event {
                ui.show_progress(index + 1, total, name);
            }
        });

        match result {
            Ok(outputs) => {
                for (name, values) in &outputs {
                    ui.show_entry(name, &format!("{:?}", values));
                }
                ui.success(&format!("Ran {} steps", pipeline.steps().len()));
                Ok(CommandResult::success())
            }
            Err(e) => {
                ui.error(&format!("Pipeline failed: {}", e));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
