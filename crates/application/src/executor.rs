//! Effect executor
//!
//! Turns an [`EffectDescriptor`] into an observable outcome: a raised fault,
//! a bounded delay, or an impact the call site acts on. Execution is the only
//! place an experiment touches the invocation.

use std::time::Duration;

use domain::{EffectDescriptor, Impact, InjectedFault};
use tracing::{debug, warn};

use crate::error::EngineError;

/// Apply a single effect to the current invocation
///
/// Latency is clamped to `max_latency` before sleeping; a clamped delay is
/// logged and the impact reports the duration actually applied. The sleep is
/// a plain tokio sleep, so dropping the invocation future cancels it.
///
/// # Errors
///
/// Returns [`EngineError::Injected`] when the effect is an `Exception`.
pub async fn execute(
    effect: &EffectDescriptor,
    max_latency: Duration,
) -> Result<Option<Impact>, EngineError> {
    match effect {
        EffectDescriptor::Exception { kind, message } => {
            debug!(kind = %kind, "raising injected fault");
            Err(InjectedFault::new(kind.clone(), message.clone()).into())
        }
        EffectDescriptor::Latency { duration } => {
            let applied = if *duration > max_latency {
                warn!(
                    requested_ms = duration.as_millis(),
                    clamped_ms = max_latency.as_millis(),
                    "latency request exceeds cap, clamping"
                );
                max_latency
            } else {
                *duration
            };
            tokio::time::sleep(applied).await;
            Ok(Some(Impact::Latency { duration: applied }))
        }
        EffectDescriptor::CorruptData => Ok(Some(Impact::Corrupted)),
        EffectDescriptor::HttpResponse(over) => Ok(Some(Impact::Response(over.clone()))),
    }
}
