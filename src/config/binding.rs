//! Argument bindings: how a single parameter slot of a step gets its value.

use serde::{Deserialize, Serialize};

/// Where the value for one parameter comes from.
///
/// In YAML a binding is a mapping tagged by `source`:
///
/// ```yaml
/// - source: initial
///   index: 0
/// - source: function_output
///   step: fetch
///   index: 1
/// - source: default
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ArgBinding {
    /// Defer to the pipeline's missing-argument policy.
    Default,
    /// Take the initial input at `index`, counting all inputs regardless of type.
    Initial { index: isize },
    /// Take the value at `index` among everything `step` has produced so far.
    FunctionOutput { step: String, index: isize },
}

impl ArgBinding {
    /// Bind to an initial input by position.
    pub fn initial(index: isize) -> Self {
        Self::Initial { index }
    }

    /// Bind to a recorded output of another step by position.
    pub fn function_output(step: impl Into<String>, index: isize) -> Self {
        Self::FunctionOutput {
            step: step.into(),
            index,
        }
    }
}

/// Per-step binding list, aligned positionally with the step's parameters.
///
/// A `null` entry, or no entry at all for trailing parameters, means default
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Bindings by parameter position.
    pub bindings: Vec<Option<ArgBinding>>,
}

impl StepConfig {
    /// Create a step config from positional bindings.
    pub fn new(bindings: Vec<Option<ArgBinding>>) -> Self {
        Self { bindings }
    }

    /// The explicit binding for the parameter at `position`, if any.
    pub fn binding_for(&self, position: usize) -> Option<&ArgBinding> {
        self.bindings.get(position).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_for_handles_gaps_and_short_lists() {
        let config = StepConfig::new(vec![None, Some(ArgBinding::initial(1))]);

        assert_eq!(config.binding_for(0), None);
        assert_eq!(config.binding_for(1), Some(&ArgBinding::initial(1)));
        assert_eq!(config.binding_for(2), None);
    }

    #[test]
    fn parses_all_sources_from_yaml() {
        let yaml = r#"
bindings:
  - source: default
  - source: initial
    index: 2
  - ~
  - source: function_output
    step: fetch
    index: 0
"#;
        let config: StepConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            config.bindings,
            vec![
                Some(ArgBinding::Default),
                Some(ArgBinding::initial(2)),
                None,
                Some(ArgBinding::function_output("fetch", 0)),
            ]
        );
    }

    #[test]
    fn negative_index_is_representable() {
        let binding: ArgBinding = serde_yaml::from_str("source: initial\nindex: -1").unwrap();
        assert_eq!(binding, ArgBinding::initial(-1));
    }

    #[test]
    fn unknown_source_is_rejected() {
        let result: Result<ArgBinding, _> = serde_yaml::from_str("source: environment");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_with_source_tag() {
        let yaml = serde_yaml::to_string(&ArgBinding::function_output("fetch", 3)).unwrap();
        assert!(yaml.contains("source: function_output"));
        assert!(yaml.contains("step: fetch"));
        assert!(yaml.contains("index: 3"));
    }
}
