//! Experiment source port
//!
//! Defines the interface for retrieving the experiments registered against a
//! checkpoint.

use async_trait::async_trait;
use domain::Experiment;
#[cfg(test)]
use mockall::automock;

/// Supplies the experiments registered for a checkpoint
///
/// The contract is infallible on purpose: a source that cannot produce
/// experiments (network down, malformed payload, timeout) logs the problem
/// and returns an empty list, so retrieval failure can never fail or delay
/// the instrumented call beyond the source's own internal time bound.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExperimentSource: Send + Sync {
    /// Fetch every experiment registered for the named checkpoint
    ///
    /// Order is preserved from the backing store; the engine applies the
    /// first matching experiment's effect.
    async fn fetch(&self, checkpoint: &str) -> Vec<Experiment>;
}
