//! Output filtering.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::value::Value;

/// Everything each step produced, keyed by step name.
pub type StepOutputs = IndexMap<String, Vec<Value>>;

/// Keep only the entries for the steps named in `filter`.
///
/// An empty filter keeps everything. Names that produced nothing do not get
/// an entry. Entry order is preserved.
pub fn filter_outputs(outputs: &StepOutputs, filter: &[String]) -> StepOutputs {
    if filter.is_empty() {
        return outputs.clone();
    }

    let wanted: HashSet<&str> = filter.iter().map(String::as_str).collect();
    outputs
        .iter()
        .filter(|(name, _)| wanted.contains(name.as_str()))
        .map(|(name, values)| (name.clone(), values.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs() -> StepOutputs {
        let mut outputs = StepOutputs::new();
        outputs.insert("load".into(), vec![Value::new(String::from("raw"))]);
        outputs.insert("parse".into(), vec![Value::new(3_usize), Value::new(true)]);
        outputs.insert("save".into(), Vec::new());
        outputs
    }

    fn names(outputs: &StepOutputs) -> Vec<&str> {
        outputs.keys().map(String::as_str).collect()
    }

    fn filter(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let all = outputs();
        let filtered = filter_outputs(&all, &[]);
        assert_eq!(names(&filtered), vec!["load", "parse", "save"]);
        assert_eq!(filtered["parse"].len(), 2);
    }

    #[test]
    fn keeps_only_named_steps() {
        let filtered = filter_outputs(&outputs(), &filter(&["parse"]));
        assert_eq!(names(&filtered), vec!["parse"]);
        assert_eq!(filtered["parse"][0].get::<usize>(), Some(3));
    }

    #[test]
    fn unknown_names_get_no_entry() {
        let filtered = filter_outputs(&outputs(), &filter(&["missing", "load"]));
        assert_eq!(names(&filtered), vec!["load"]);
        assert!(!filtered.contains_key("missing"));
    }

    #[test]
    fn keeps_log_order_not_filter_order() {
        let filtered = filter_outputs(&outputs(), &filter(&["save", "load"]));
        assert_eq!(names(&filtered), vec!["load", "save"]);
    }

    #[test]
    fn filtering_twice_equals_filtering_once() {
        let wanted = filter(&["save", "parse", "ghost"]);
        let once = filter_outputs(&outputs(), &wanted);
        let twice = filter_outputs(&once, &wanted);
        assert_eq!(names(&once), names(&twice));
        assert_eq!(
            format!("{:?}", once.values().collect::<Vec<_>>()),
            format!("{:?}", twice.values().collect::<Vec<_>>())
        );
    }
}
