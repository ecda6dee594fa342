//! Domain-level errors

use thiserror::Error;

use crate::effects::FaultKind;

/// Errors that can occur while building domain objects
///
/// These are construction-time errors in the experiment source adapters.
/// They never reach the invocation pipeline: a source that encounters one
/// logs it and drops the offending experiment (fail-open).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Effect descriptor did not declare exactly one effect
    #[error("Malformed effect descriptor: {0}")]
    MalformedEffect(String),

    /// Experiment is structurally invalid
    #[error("Invalid experiment '{id}': {reason}")]
    InvalidExperiment { id: String, reason: String },
}

impl DomainError {
    /// Create an invalid-experiment error
    pub fn invalid_experiment(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidExperiment {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// A synthetic error raised by an `Exception` effect
///
/// Distinct from any engine malfunction: receiving one means the experiment
/// worked. Callers map [`FaultKind`] to a transport-visible status; the
/// engine knows nothing about transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InjectedFault {
    /// Kind tag for the caller's error mapping
    pub kind: FaultKind,
    /// Message carried by the fault
    pub message: String,
}

impl InjectedFault {
    /// Create a fault with the given kind and message
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
