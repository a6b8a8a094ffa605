//! Step ordering from a partial, configured order.
//!
//! The configured order names the steps that should run first. Everything
//! it does not mention keeps its registration order and runs afterwards.

use std::collections::{HashMap, HashSet};

/// Outcome of applying a configured order to the registered steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOrdering {
    /// Indices into the registered steps, in execution order.
    pub sequence: Vec<usize>,
    /// Configured names that match no registered step.
    pub unknown: Vec<String>,
}

impl StepOrdering {
    /// Check if the ordering leaves registration order untouched.
    pub fn is_identity(&self) -> bool {
        self.sequence.iter().enumerate().all(|(i, &s)| i == s)
    }
}

/// Compute the execution order of `names` (registration order) under `desired`.
///
/// A configured name pulls every step registered under it, in registration
/// order, at the position of its first mention; later mentions are ignored.
/// Unknown names are reported in [`StepOrdering::unknown`] and otherwise skipped.
pub fn order_steps<S: AsRef<str>>(names: &[S], desired: &[String]) -> StepOrdering {
    if desired.is_empty() {
        return StepOrdering {
            sequence: (0..names.len()).collect(),
            unknown: Vec::new(),
        };
    }

    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, name) in names.iter().enumerate() {
        by_name.entry(name.as_ref()).or_default().push(index);
    }

    let mut used: HashSet<&str> = HashSet::new();
    let mut ordering = StepOrdering::default();

    for name in desired {
        match by_name.get(name.as_str()) {
            Some(indices) => {
                if used.insert(name.as_str()) {
                    ordering.sequence.extend(indices);
                }
            }
            None => ordering.unknown.push(name.clone()),
        }
    }

    ordering.sequence.extend(
        names
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                let name: &str = name.as_ref();
                !used.contains(name)
            })
            .map(|(index, _)| index),
    );

    ordering
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(names: &[&str], desired: &[&str]) -> (Vec<String>, Vec<String>) {
        let desired: Vec<String> = desired.iter().map(|s| s.to_string()).collect();
        let ordering = order_steps(names, &desired);
        let sequence = ordering
            .sequence
            .iter()
            .map(|&i| names[i].to_string())
            .collect();
        (sequence, ordering.unknown)
    }

    #[test]
    fn empty_order_is_identity() {
        let ordering = order_steps(&["a", "b", "c"], &[]);
        assert_eq!(ordering.sequence, vec![0, 1, 2]);
        assert!(ordering.unknown.is_empty());
        assert!(ordering.is_identity());
    }

    #[test]
    fn full_order_is_followed() {
        let (sequence, unknown) = order(&["a", "b", "c"], &["c", "a", "b"]);
        assert_eq!(sequence, vec!["c", "a", "b"]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn unlisted_steps_follow_in_registration_order() {
        let (sequence, _) = order(&["a", "b", "c", "d"], &["c"]);
        assert_eq!(sequence, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn unknown_names_are_reported_and_skipped() {
        let (sequence, unknown) = order(&["a", "b"], &["x", "b", "y"]);
        assert_eq!(sequence, vec!["b", "a"]);
        assert_eq!(unknown, vec!["x", "y"]);
    }

    #[test]
    fn only_unknown_names_keep_registration_order() {
        let (sequence, unknown) = order(&["a", "b"], &["zzz"]);
        assert_eq!(sequence, vec!["a", "b"]);
        assert_eq!(unknown, vec!["zzz"]);
    }

    #[test]
    fn repeated_names_run_once() {
        let (sequence, _) = order(&["a", "b"], &["b", "b", "a", "b"]);
        assert_eq!(sequence, vec!["b", "a"]);
    }

    #[test]
    fn duplicate_registrations_move_together() {
        let ordering = order_steps(&["a", "dup", "b", "dup"], &["dup".to_string()]);
        assert_eq!(ordering.sequence, vec![1, 3, 0, 2]);
    }

    #[test]
    fn every_step_appears_exactly_once() {
        let names = ["s1", "s2", "s3", "s4", "s5"];
        let desired: Vec<String> = ["s4", "nope", "s2", "s4"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut sequence = order_steps(&names, &desired).sequence;
        assert_eq!(sequence, vec![3, 1, 0, 2, 4]);

        sequence.sort_unstable();
        assert_eq!(sequence, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn no_steps_yields_nothing() {
        let names: [&str; 0] = [];
        let ordering = order_steps(&names, &["a".to_string()]);
        assert!(ordering.sequence.is_empty());
        assert_eq!(ordering.unknown, vec!["a"]);
    }
}
