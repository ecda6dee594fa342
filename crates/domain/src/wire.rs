//! Control-plane wire format
//!
//! The loose JSON shape experiments arrive in (configuration file or remote
//! control plane), plus the conversion into the closed domain types. Unknown
//! or ambiguous effect shapes are rejected here, at construction time, so the
//! executor never sees a descriptor it does not understand.
//!
//! Effect shape on the wire:
//!
//! ```json
//! { "exception": { "type": "NoCredentials", "message": "..." } }
//! { "latency_ms": 250 }
//! { "corrupt": true }
//! { "http_response": { "status": 429, "body": { "message": "..." }, "headers": {} } }
//! ```
//!
//! Target matchers are `{label: "value" | "*" | null}` for exact-equality,
//! wildcard-present, and required-absent respectively.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::effects::{EffectDescriptor, FaultKind, ResponseOverride};
use crate::errors::DomainError;
use crate::experiment::{Experiment, MatchRule};

/// Wire shape of the `exception` effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionWire {
    /// Kind string, parsed leniently into [`FaultKind`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Message carried by the raised fault
    pub message: String,
}

/// Wire shape of the `http_response` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyWire {
    /// Body message text
    pub message: String,
}

/// Wire shape of the `http_response` effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponseWire {
    /// Status code to synthesize
    pub status: u16,
    /// Response body
    pub body: BodyWire,
    /// Headers to attach
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Wire shape of an effect descriptor
///
/// Exactly one field must be set; anything else is a construction-time
/// [`DomainError::MalformedEffect`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectWire {
    /// Raise a synthetic error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionWire>,
    /// Delay the invocation by this many milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Mark the caller's result as corrupted (must be `true` when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrupt: Option<bool>,
    /// Synthesize a full response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_response: Option<HttpResponseWire>,
}

impl EffectWire {
    fn variant_count(&self) -> usize {
        usize::from(self.exception.is_some())
            + usize::from(self.latency_ms.is_some())
            + usize::from(self.corrupt.is_some())
            + usize::from(self.http_response.is_some())
    }
}

impl TryFrom<EffectWire> for EffectDescriptor {
    type Error = DomainError;

    fn try_from(wire: EffectWire) -> Result<Self, Self::Error> {
        match wire.variant_count() {
            0 => {
                return Err(DomainError::MalformedEffect(
                    "no effect declared".to_string(),
                ));
            }
            1 => {}
            n => {
                return Err(DomainError::MalformedEffect(format!(
                    "{n} effects declared, expected exactly one"
                )));
            }
        }

        if let Some(exception) = wire.exception {
            return Ok(Self::Exception {
                kind: FaultKind::parse(&exception.kind),
                message: exception.message,
            });
        }
        if let Some(latency_ms) = wire.latency_ms {
            return Ok(Self::Latency {
                duration: Duration::from_millis(latency_ms),
            });
        }
        if let Some(corrupt) = wire.corrupt {
            if !corrupt {
                return Err(DomainError::MalformedEffect(
                    "'corrupt' must be true when present".to_string(),
                ));
            }
            return Ok(Self::CorruptData);
        }
        if let Some(response) = wire.http_response {
            return Ok(Self::HttpResponse(ResponseOverride {
                status: response.status,
                body_message: response.body.message,
                headers: response.headers,
            }));
        }

        // variant_count() == 1 guarantees one branch above returned
        Err(DomainError::MalformedEffect("unreachable".to_string()))
    }
}

/// Wire shape of a full experiment definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentWire {
    /// Stable identifier
    pub id: String,
    /// `{label: "value" | "*" | null}`
    #[serde(default)]
    pub target_matchers: BTreeMap<String, Option<String>>,
    /// Effect descriptor
    pub effect: EffectWire,
}

fn rule_from_wire(value: Option<String>) -> MatchRule {
    match value {
        None => MatchRule::Absent,
        Some(s) if s == "*" => MatchRule::Any,
        Some(s) => MatchRule::Exact(s),
    }
}

impl TryFrom<ExperimentWire> for Experiment {
    type Error = DomainError;

    fn try_from(wire: ExperimentWire) -> Result<Self, Self::Error> {
        if wire.id.trim().is_empty() {
            return Err(DomainError::invalid_experiment(wire.id, "empty id"));
        }

        let effect = EffectDescriptor::try_from(wire.effect)
            .map_err(|e| DomainError::invalid_experiment(&wire.id, e.to_string()))?;

        let target_matchers = wire
            .target_matchers
            .into_iter()
            .map(|(label, value)| (label, rule_from_wire(value)))
            .collect();

        Ok(Self {
            id: wire.id,
            target_matchers,
            effect,
        })
    }
}
