//! Application layer - The fault-injection decision engine
//!
//! Contains the invocation pipeline (evaluate, match, dispatch, execute),
//! the behavior seam for caller-supplied effect handling, and the port
//! definition for experiment retrieval. Orchestrates domain objects and
//! infrastructure adapters.

pub mod behavior;
pub mod engine;
pub mod error;
pub mod executor;
pub mod invocation;
pub mod ports;

pub use behavior::{Behavior, BehaviorOutcome};
pub use engine::{EngineConfig, InjectionEngine};
pub use error::EngineError;
pub use invocation::{InvocationContext, InvocationResult};
pub use ports::ExperimentSource;
