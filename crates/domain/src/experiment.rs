//! Experiments and targeting rules
//!
//! An experiment pairs a set of label matchers with an effect. Matching is
//! pure: it depends only on the labels and the rule set, never on hidden
//! state, so two identical invocations against an unchanged experiment set
//! always match identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::effects::EffectDescriptor;
use crate::labels::Labels;

/// Rule for a single target label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Label must be present with exactly this value
    Exact(String),
    /// Label must be present, any value
    Any,
    /// Label must not be present
    Absent,
}

impl MatchRule {
    /// Whether the rule is satisfied by the (possibly missing) label value
    #[must_use]
    pub fn satisfied_by(&self, value: Option<&str>) -> bool {
        match self {
            Self::Exact(expected) => value == Some(expected.as_str()),
            Self::Any => value.is_some(),
            Self::Absent => value.is_none(),
        }
    }
}

/// A fault-injection experiment: targeting rules plus one effect
///
/// Supplied externally (config or a remote control plane) and read-only from
/// the engine's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    /// Stable identifier, used for logging and observability
    pub id: String,
    /// Per-label rules; an empty set matches every invocation (global)
    #[serde(default)]
    pub target_matchers: BTreeMap<String, MatchRule>,
    /// What happens when the experiment fires
    pub effect: EffectDescriptor,
}

impl Experiment {
    /// Create an experiment with no matchers (global targeting)
    #[must_use]
    pub fn new(id: impl Into<String>, effect: EffectDescriptor) -> Self {
        Self {
            id: id.into(),
            target_matchers: BTreeMap::new(),
            effect,
        }
    }

    /// Add a target matcher (builder style)
    #[must_use]
    pub fn with_matcher(mut self, label: impl Into<String>, rule: MatchRule) -> Self {
        self.target_matchers.insert(label.into(), rule);
        self
    }

    /// Whether this experiment targets the given labels
    ///
    /// Every matcher must be satisfied; labels without a matcher are
    /// vacuously satisfied, so the empty rule set matches everything.
    #[must_use]
    pub fn targets(&self, labels: &Labels) -> bool {
        self.target_matchers
            .iter()
            .all(|(label, rule)| rule.satisfied_by(labels.get(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectDescriptor, FaultKind};

    fn exception_effect() -> EffectDescriptor {
        EffectDescriptor::Exception {
            kind: FaultKind::Client,
            message: "simulated".into(),
        }
    }

    #[test]
    fn exact_rule() {
        let rule = MatchRule::Exact("eu-central-1".into());
        assert!(rule.satisfied_by(Some("eu-central-1")));
        assert!(!rule.satisfied_by(Some("us-east-1")));
        assert!(!rule.satisfied_by(None));
    }

    #[test]
    fn any_rule() {
        let rule = MatchRule::Any;
        assert!(rule.satisfied_by(Some("anything")));
        assert!(rule.satisfied_by(Some("")));
        assert!(!rule.satisfied_by(None));
    }

    #[test]
    fn absent_rule() {
        let rule = MatchRule::Absent;
        assert!(rule.satisfied_by(None));
        assert!(!rule.satisfied_by(Some("present")));
    }

    #[test]
    fn empty_matcher_set_is_global() {
        let exp = Experiment::new("global", exception_effect());
        assert!(exp.targets(&Labels::new()));
        assert!(exp.targets(&Labels::new().with("anything", "at all")));
    }

    #[test]
    fn all_matchers_must_be_satisfied() {
        let exp = Experiment::new("both", exception_effect())
            .with_matcher("region", MatchRule::Exact("eu-central-1".into()))
            .with_matcher("path", MatchRule::Any);

        let matching = Labels::new()
            .with("region", "eu-central-1")
            .with("path", "img/");
        assert!(exp.targets(&matching));

        let wrong_region = Labels::new()
            .with("region", "us-east-1")
            .with("path", "img/");
        assert!(!exp.targets(&wrong_region));

        let missing_path = Labels::new().with("region", "eu-central-1");
        assert!(!exp.targets(&missing_path));
    }

    #[test]
    fn absent_matcher_rejects_present_label() {
        let exp = Experiment::new("no-canary", exception_effect())
            .with_matcher("canary", MatchRule::Absent);

        assert!(exp.targets(&Labels::new()));
        assert!(!exp.targets(&Labels::new().with("canary", "true")));
    }

    #[test]
    fn unrelated_labels_are_ignored() {
        let exp = Experiment::new("path-only", exception_effect())
            .with_matcher("path", MatchRule::Exact("img/".into()));

        let labels = Labels::new()
            .with("path", "img/")
            .with("region", "eu-central-1")
            .with("az", "eu-central-1a");
        assert!(exp.targets(&labels));
    }

    #[test]
    fn matching_is_deterministic() {
        let exp = Experiment::new("det", exception_effect())
            .with_matcher("path", MatchRule::Any);
        let labels = Labels::new().with("path", "x");
        assert_eq!(exp.targets(&labels), exp.targets(&labels));
    }

    #[test]
    fn experiment_serde_roundtrip() {
        let exp = Experiment::new("round", exception_effect())
            .with_matcher("region", MatchRule::Exact("eu-central-1".into()))
            .with_matcher("canary", MatchRule::Absent);
        let json = serde_json::to_string(&exp).unwrap();
        let parsed: Experiment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, exp);
    }
}
