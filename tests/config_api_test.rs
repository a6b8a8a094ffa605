//! Integration tests for config module public API.

use stepchain::config::{
    load_config, load_merged_config, ArgBinding, ConfigPaths, MissingArgPolicy, PipelineConfig,
    CONFIG_DIR,
};
use stepchain::StepchainError;
use std::fs;
use tempfile::TempDir;

fn project_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
    temp
}

#[test]
fn public_api_is_accessible() {
    let _config = PipelineConfig::default();
    let _policy = MissingArgPolicy::Fail;
    let _binding = ArgBinding::function_output("step", 0);
}

#[test]
fn full_config_workflow() {
    let temp = project_dir();
    fs::write(
        temp.path().join(CONFIG_DIR).join("config.yml"),
        r#"
step_order: [Step2, Step1]
missing_arg_policy: fail
output_filter: [Step2]
steps:
  Step2:
    bindings:
      - source: function_output
        step: Step1
        index: 0
      - source: default
      - null
"#,
    )
    .unwrap();

    let config = load_merged_config(temp.path()).unwrap();

    assert_eq!(config.step_order, vec!["Step2", "Step1"]);
    assert_eq!(config.missing_arg_policy, MissingArgPolicy::Fail);
    assert_eq!(config.output_filter, vec!["Step2"]);

    let step2 = config.step_config("Step2").unwrap();
    assert_eq!(
        step2.binding_for(0),
        Some(&ArgBinding::function_output("Step1", 0))
    );
    assert_eq!(step2.binding_for(1), Some(&ArgBinding::Default));
    assert_eq!(step2.binding_for(2), None);
    assert_eq!(step2.binding_for(3), None);
}

#[test]
fn config_merge_workflow() {
    let temp = project_dir();
    let dir = temp.path().join(CONFIG_DIR);

    fs::write(
        dir.join("config.yml"),
        r#"
step_order: [load, parse]
missing_arg_policy: fail
steps:
  parse:
    bindings:
      - source: initial
        index: 0
"#,
    )
    .unwrap();

    fs::write(
        dir.join("config.local.yml"),
        r#"
missing_arg_policy: use_latest
step_order: [parse]
steps:
  render:
    bindings:
      - source: initial
        index: 2
"#,
    )
    .unwrap();

    let config = load_merged_config(temp.path()).unwrap();

    // Sequences are replaced, not appended
    assert_eq!(config.step_order, vec!["parse"]);
    // Scalar overridden by local
    assert_eq!(config.missing_arg_policy, MissingArgPolicy::UseLatest);
    // Mappings merge
    assert!(config.step_config("parse").is_some());
    assert!(config.step_config("render").is_some());
}

#[test]
fn missing_config_is_reported() {
    let temp = TempDir::new().unwrap();

    let err = load_merged_config(temp.path()).unwrap_err();
    assert!(matches!(err, StepchainError::ConfigNotFound { .. }));
    assert!(!ConfigPaths::discover(temp.path()).has_project_config());
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let temp = project_dir();
    fs::write(
        temp.path().join(CONFIG_DIR).join("config.yml"),
        "missing_arg_policy: guess\n",
    )
    .unwrap();

    let err = load_merged_config(temp.path()).unwrap_err();
    match err {
        StepchainError::ConfigParseError { message, .. } => assert!(message.contains("guess")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn explicit_path_skips_local_overrides() {
    let temp = project_dir();
    let dir = temp.path().join(CONFIG_DIR);
    fs::write(dir.join("config.local.yml"), "missing_arg_policy: fail\n").unwrap();
    let custom = temp.path().join("pipeline.yml");
    fs::write(&custom, "output_filter: [only]\n").unwrap();

    let config = load_config(temp.path(), Some(&custom)).unwrap();

    assert_eq!(config.output_filter, vec!["only"]);
    assert_eq!(config.missing_arg_policy, MissingArgPolicy::UseLatest);
}

#[test]
fn policy_parses_from_cli_style_names() {
    assert_eq!(
        "use-latest".parse::<MissingArgPolicy>().unwrap(),
        MissingArgPolicy::UseLatest
    );
    assert_eq!("FAIL".parse::<MissingArgPolicy>().unwrap(), MissingArgPolicy::Fail);
    assert!(matches!(
        "maybe".parse::<MissingArgPolicy>(),
        Err(StepchainError::UnknownPolicy { .. })
    ));
}

#[test]
fn config_round_trips_through_yaml() {
    let config = PipelineConfig::new()
        .with_step_order(["b", "a"])
        .with_policy(MissingArgPolicy::Fail);

    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: PipelineConfig = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(parsed, config);
}
