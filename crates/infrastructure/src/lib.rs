//! Infrastructure layer - Adapters and wiring
//!
//! Experiment source adapters (static, HTTP control plane, caching),
//! configuration loading, fault-to-status mapping for HTTP callers, and
//! telemetry initialization.

pub mod config;
pub mod http;
pub mod sources;
pub mod telemetry;

pub use config::{FaultGateConfig, SourceConfig};
pub use http::status_for_fault;
pub use sources::{CachedExperimentSource, HttpExperimentSource, StaticExperimentSource};
pub use telemetry::LogFormat;
