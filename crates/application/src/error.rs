//! Engine-level errors

use domain::{FaultKind, InjectedFault};
use thiserror::Error;

/// Errors surfaced to the instrumented call site
///
/// The only error an invocation can produce by design is an injected fault.
/// Behavior failures are kept separate so callers can tell an intentional
/// fault from a broken custom handler.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An `Exception` effect fired; this failure is intentional
    #[error(transparent)]
    Injected(#[from] InjectedFault),

    /// A caller-supplied behavior failed while handling a match
    #[error("behavior '{name}' failed: {source}")]
    Behavior {
        /// Name of the failing behavior
        name: String,
        /// Underlying behavior error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EngineError {
    /// Wrap a behavior failure
    pub fn behavior(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Behavior {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Whether this error is an intentionally injected fault
    #[must_use]
    pub const fn is_injected(&self) -> bool {
        matches!(self, Self::Injected(_))
    }

    /// The injected fault, if this error is one
    #[must_use]
    pub const fn as_injected(&self) -> Option<&InjectedFault> {
        match self {
            Self::Injected(fault) => Some(fault),
            Self::Behavior { .. } => None,
        }
    }

    /// The fault kind, if this error is an injected fault
    #[must_use]
    pub fn fault_kind(&self) -> Option<&FaultKind> {
        self.as_injected().map(|fault| &fault.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_fault_converts_transparently() {
        let err: EngineError = InjectedFault::new(FaultKind::NoCredentials, "simulated").into();
        assert!(err.is_injected());
        assert_eq!(err.to_string(), "simulated");
        assert_eq!(err.fault_kind(), Some(&FaultKind::NoCredentials));
    }

    #[test]
    fn behavior_error_names_the_behavior() {
        let err = EngineError::behavior("custom-latency", "socket closed");
        assert!(!err.is_injected());
        assert!(err.as_injected().is_none());
        assert_eq!(err.to_string(), "behavior 'custom-latency' failed: socket closed");
    }
}
