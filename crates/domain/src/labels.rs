//! Invocation labels
//!
//! A flat string-to-string mapping attached to every invocation (checkpoint
//! path, service name, operation, region, availability zone, ...). Labels are
//! the sole targeting key experiments can match on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat label set carried by an invocation
///
/// Backed by a `BTreeMap` so iteration order (and therefore logging and
/// serialization) is deterministic.
///
/// # Examples
///
/// ```
/// use domain::Labels;
///
/// let labels = Labels::new()
///     .with("path", "images/2024/")
///     .with("region", "eu-central-1");
///
/// assert_eq!(labels.get("region"), Some("eu-central-1"));
/// assert!(!labels.contains("az"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    /// Create an empty label set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a label, consuming and returning the set (builder style)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a label in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a label value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a label is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let labels = Labels::new();
        assert!(labels.is_empty());
        assert_eq!(labels.len(), 0);
    }

    #[test]
    fn with_adds_labels() {
        let labels = Labels::new().with("a", "1").with("b", "2");
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("a"), Some("1"));
        assert_eq!(labels.get("b"), Some("2"));
    }

    #[test]
    fn with_overwrites_existing_key() {
        let labels = Labels::new().with("a", "1").with("a", "2");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("a"), Some("2"));
    }

    #[test]
    fn insert_in_place() {
        let mut labels = Labels::new();
        labels.insert("region", "eu-central-1");
        assert!(labels.contains("region"));
    }

    #[test]
    fn get_missing_returns_none() {
        let labels = Labels::new().with("a", "1");
        assert_eq!(labels.get("b"), None);
        assert!(!labels.contains("b"));
    }

    #[test]
    fn from_iterator() {
        let labels: Labels = [("path", "img/"), ("service", "listing")]
            .into_iter()
            .collect();
        assert_eq!(labels.get("path"), Some("img/"));
        assert_eq!(labels.get("service"), Some("listing"));
    }

    #[test]
    fn iter_is_key_ordered() {
        let labels = Labels::new().with("b", "2").with("a", "1");
        let keys: Vec<&str> = labels.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn serde_transparent_map() {
        let labels = Labels::new().with("path", "img/");
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"path":"img/"}"#);

        let parsed: Labels = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, labels);
    }
}
