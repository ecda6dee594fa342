//! Experiment source adapters
//!
//! All adapters implement [`application::ExperimentSource`] and honor its
//! fail-open contract: retrieval trouble is logged and reported as an empty
//! experiment set, never as an error or an unbounded wait.

pub mod cached;
pub mod http_source;
pub mod static_source;

pub use cached::CachedExperimentSource;
pub use http_source::{HttpExperimentSource, SourceError};
pub use static_source::StaticExperimentSource;
