//! In-process experiment registry
//!
//! Backs tests and single-process deployments where experiments are
//! registered programmatically instead of fetched from a control plane.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use domain::Experiment;

use application::ExperimentSource;

/// Experiment source backed by an in-memory map
///
/// The registry is an [`ArcSwap`] snapshot, so readers never block: a fetch
/// sees the set as of its own start, and concurrent updates publish a new
/// snapshot atomically.
#[derive(Debug, Default)]
pub struct StaticExperimentSource {
    registry: ArcSwap<HashMap<String, Vec<Experiment>>>,
}

impl StaticExperimentSource {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an experiment to a checkpoint's set
    pub fn register(&self, checkpoint: impl Into<String>, experiment: Experiment) {
        let checkpoint = checkpoint.into();
        self.registry.rcu(|current| {
            let mut next: HashMap<String, Vec<Experiment>> = (**current).clone();
            next.entry(checkpoint.clone()).or_default().push(experiment.clone());
            next
        });
    }

    /// Replace the whole registry atomically
    pub fn replace_all(&self, registry: HashMap<String, Vec<Experiment>>) {
        self.registry.store(Arc::new(registry));
    }

    /// Remove every experiment for a checkpoint
    pub fn clear(&self, checkpoint: &str) {
        self.registry.rcu(|current| {
            let mut next: HashMap<String, Vec<Experiment>> = (**current).clone();
            next.remove(checkpoint);
            next
        });
    }
}

#[async_trait]
impl ExperimentSource for StaticExperimentSource {
    async fn fetch(&self, checkpoint: &str) -> Vec<Experiment> {
        self.registry
            .load()
            .get(checkpoint)
            .cloned()
            .unwrap_or_default()
    }
}
