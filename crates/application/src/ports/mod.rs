//! Port definitions for infrastructure adapters

pub mod experiment_source;

pub use experiment_source::ExperimentSource;
#[cfg(test)]
pub use experiment_source::MockExperimentSource;
