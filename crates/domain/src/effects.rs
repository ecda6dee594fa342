//! Effect taxonomy
//!
//! Closed sum types describing what an experiment does when it fires. The
//! descriptor says what *should* happen; [`Impact`] records what *did* happen
//! to a given invocation.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Kind tag for an injected synthetic error
///
/// The known kinds mirror the error taxonomy of the instrumented service;
/// anything else is preserved verbatim in [`FaultKind::Other`] so information
/// is never silently dropped. The engine itself attaches no transport meaning
/// to a kind; that mapping belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Simulated credential failure
    NoCredentials,
    /// Simulated generic client failure
    Client,
    /// Open catch-all carrying the original kind string
    Other(String),
}

impl FaultKind {
    /// Parse a wire kind string
    ///
    /// Never fails: unrecognized kinds become [`FaultKind::Other`].
    #[must_use]
    pub fn parse(kind: &str) -> Self {
        match kind {
            "NoCredentials" | "NoCredentialsError" => Self::NoCredentials,
            "Client" | "ClientError" => Self::Client,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical wire string for this kind
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoCredentials => "NoCredentials",
            Self::Client => "Client",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully synthesized response, returned instead of the real result
///
/// The engine hands this back verbatim; the caller terminates its own
/// response-building with these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOverride {
    /// HTTP status code to synthesize
    pub status: u16,
    /// Body message text
    pub body_message: String,
    /// Headers to attach to the synthesized response
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ResponseOverride {
    /// Create an override with no headers
    #[must_use]
    pub fn new(status: u16, body_message: impl Into<String>) -> Self {
        Self {
            status,
            body_message: body_message.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Attach a header (builder style)
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// What an experiment does when it fires
///
/// Exactly one effect per experiment; an experiment combining effects is
/// represented as two experiments matching the same checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum EffectDescriptor {
    /// Raise a synthetic error tagged with `kind` and carrying `message`
    Exception {
        /// Error kind tag, mapped to a transport status by the caller
        kind: FaultKind,
        /// Message carried by the raised error
        message: String,
    },
    /// Block the invocation for the given duration (clamped by the engine)
    Latency {
        /// Requested delay
        duration: Duration,
    },
    /// Signal the caller to treat its own result as corrupted
    CorruptData,
    /// Synthesize a full response instead of the real operation
    HttpResponse(ResponseOverride),
}

impl EffectDescriptor {
    /// Short effect name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Exception { .. } => "exception",
            Self::Latency { .. } => "latency",
            Self::CorruptData => "corrupt_data",
            Self::HttpResponse(_) => "http_response",
        }
    }
}

/// The effect actually applied to an invocation
///
/// `None` impact with `active = true` means experiments matched but no effect
/// was applied (e.g. a custom behavior handled the match without acting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum Impact {
    /// The invocation was delayed for the (possibly clamped) duration
    Latency {
        /// Delay actually applied
        duration: Duration,
    },
    /// The caller should treat its result as corrupted
    Corrupted,
    /// The caller should respond with this override instead of the real result
    Response(ResponseOverride),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_kind_parse_known() {
        assert_eq!(FaultKind::parse("NoCredentials"), FaultKind::NoCredentials);
        assert_eq!(
            FaultKind::parse("NoCredentialsError"),
            FaultKind::NoCredentials
        );
        assert_eq!(FaultKind::parse("Client"), FaultKind::Client);
        assert_eq!(FaultKind::parse("ClientError"), FaultKind::Client);
    }

    #[test]
    fn fault_kind_parse_unknown_preserves_string() {
        let kind = FaultKind::parse("CustomAppException");
        assert_eq!(kind, FaultKind::Other("CustomAppException".to_string()));
        assert_eq!(kind.as_str(), "CustomAppException");
    }

    #[test]
    fn fault_kind_display() {
        assert_eq!(FaultKind::NoCredentials.to_string(), "NoCredentials");
        assert_eq!(FaultKind::Client.to_string(), "Client");
        assert_eq!(FaultKind::Other("X".into()).to_string(), "X");
    }

    #[test]
    fn response_override_builder() {
        let over = ResponseOverride::new(429, "throttled").with_header("Retry-After", "1");
        assert_eq!(over.status, 429);
        assert_eq!(over.body_message, "throttled");
        assert_eq!(over.headers.get("Retry-After").map(String::as_str), Some("1"));
    }

    #[test]
    fn effect_names() {
        assert_eq!(
            EffectDescriptor::Exception {
                kind: FaultKind::Client,
                message: "m".into()
            }
            .name(),
            "exception"
        );
        assert_eq!(
            EffectDescriptor::Latency {
                duration: Duration::from_millis(10)
            }
            .name(),
            "latency"
        );
        assert_eq!(EffectDescriptor::CorruptData.name(), "corrupt_data");
        assert_eq!(
            EffectDescriptor::HttpResponse(ResponseOverride::new(503, "down")).name(),
            "http_response"
        );
    }

    #[test]
    fn effect_serde_roundtrip() {
        let effect = EffectDescriptor::Exception {
            kind: FaultKind::NoCredentials,
            message: "simulated".into(),
        };
        let json = serde_json::to_string(&effect).unwrap();
        assert!(json.contains("exception"));

        let parsed: EffectDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, effect);
    }

    #[test]
    fn impact_serde_roundtrip() {
        let impact = Impact::Response(ResponseOverride::new(429, "throttled"));
        let json = serde_json::to_string(&impact).unwrap();
        let parsed: Impact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, impact);
    }
}
