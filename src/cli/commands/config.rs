//! Config command implementation.
//!
//! The `stepchain config` command shows the resolved pipeline configuration.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::ConfigPaths;
use crate::error::{Result, StepchainError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_optional_config;

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    fn sources(&self) -> Vec<PathBuf> {
        match &self.config_path {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_optional_config(&self.project_root, self.config_path.as_deref())? {
            Some(config) => {
                if !self.args.json {
                    for path in self.sources() {
                        ui.message(&format!("# {}", path.display()));
                    }
                }
                config
            }
            None => {
                ui.warning("No configuration found, showing defaults");
                Default::default()
            }
        };

        let rendered = if self.args.json {
            serde_json::to_string_pretty(&config).map_err(|e| StepchainError::Other(e.into()))?
        } else {
            serde_yaml::to_string(&config).map_err(|e| StepchainError::Other(e.into()))?
        };
        ui.message(rendered.trim_end());

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    fn rendered(ui: &MockUI) -> &str {
        ui.messages().last().unwrap()
    }

    #[test]
    fn config_without_project_shows_defaults() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.warnings()[0].contains("No configuration found"));
        assert!(rendered(&ui).contains("missing_arg_policy: use_latest"));
    }

    #[test]
    fn config_shows_config_path() {
        let temp = setup_project("step_order: [Step2]\n");
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.messages().iter().any(|m| m.contains("config.yml")));
        assert!(rendered(&ui).contains("Step2"));
    }

    #[test]
    fn config_merges_local_overrides() {
        let temp = setup_project("missing_arg_policy: fail\noutput_filter: [Step1]\n");
        fs::write(
            temp.path().join(CONFIG_DIR).join("config.local.yml"),
            "missing_arg_policy: use_latest\n",
        )
        .unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(rendered(&ui).contains("use_latest"));
        assert!(rendered(&ui).contains("Step1"));
        assert!(ui.messages().iter().any(|m| m.contains("config.local.yml")));
    }

    #[test]
    fn config_json_output() {
        let temp = setup_project("missing_arg_policy: fail\n");
        let args = ConfigArgs { json: true };
        let cmd = ConfigCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let json: serde_json::Value = serde_json::from_str(rendered(&ui)).unwrap();
        assert_eq!(json["missing_arg_policy"], "fail");
        assert_eq!(ui.messages().len(), 1);
    }

    #[test]
    fn explicit_config_path_is_used() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "output_filter: [Step2]\n").unwrap();
        let cmd = ConfigCommand::new(temp.path(), Some(&path), ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.messages()[0].contains("custom.yml"));
        assert!(rendered(&ui).contains("Step2"));
    }
}
