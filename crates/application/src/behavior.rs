//! Custom behavior seam
//!
//! A [`Behavior`] lets the instrumented call site decide what a matched
//! experiment means, instead of the engine's default effect execution. The
//! engine consults it once per invocation with the full matched list.

use async_trait::async_trait;
use domain::{Experiment, Impact};
#[cfg(test)]
use mockall::automock;

use crate::error::EngineError;
use crate::invocation::InvocationContext;

/// Outcome of a behavior's intercept call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BehaviorOutcome {
    /// The behavior handled the match; default execution is skipped entirely
    Handled(Option<Impact>),
    /// The behavior declined; the engine applies the default effect
    Continue,
}

/// Caller-supplied handling for matched experiments
///
/// Attached per invocation via
/// [`InvocationContext::with_behavior`](crate::InvocationContext::with_behavior).
/// When present it runs before default execution and its
/// [`BehaviorOutcome::Handled`] is final, including `Handled(None)` which
/// suppresses the effect while keeping the invocation active.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Behavior: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &str {
        "custom"
    }

    /// Decide what the matched experiments mean for this invocation
    ///
    /// Receives the invocation context and every matched experiment in
    /// source order. A behavior may raise an injected fault itself by
    /// returning [`EngineError::Injected`]; any other error should be
    /// wrapped in [`EngineError::Behavior`] so callers can distinguish a
    /// broken handler from an intentional fault.
    async fn intercept(
        &self,
        ctx: &InvocationContext,
        matched: &[Experiment],
    ) -> Result<BehaviorOutcome, EngineError>;
}

#[cfg(test)]
mod tests {
    use domain::{EffectDescriptor, FaultKind};

    use super::*;

    struct CountingBehavior;

    #[async_trait]
    impl Behavior for CountingBehavior {
        fn name(&self) -> &str {
            "counting"
        }

        async fn intercept(
            &self,
            _ctx: &InvocationContext,
            matched: &[Experiment],
        ) -> Result<BehaviorOutcome, EngineError> {
            if matched.len() > 1 {
                Ok(BehaviorOutcome::Handled(Some(Impact::Corrupted)))
            } else {
                Ok(BehaviorOutcome::Continue)
            }
        }
    }

    fn experiment(id: &str) -> Experiment {
        Experiment::new(
            id,
            EffectDescriptor::Exception {
                kind: FaultKind::Client,
                message: "m".into(),
            },
        )
    }

    #[tokio::test]
    async fn behavior_sees_full_matched_list() {
        let behavior = CountingBehavior;
        let ctx = InvocationContext::new("cp");
        let one = behavior.intercept(&ctx, &[experiment("a")]).await.unwrap();
        assert_eq!(one, BehaviorOutcome::Continue);

        let two = behavior
            .intercept(&ctx, &[experiment("a"), experiment("b")])
            .await
            .unwrap();
        assert_eq!(two, BehaviorOutcome::Handled(Some(Impact::Corrupted)));
    }

    #[test]
    fn default_name() {
        struct Anon;

        #[async_trait]
        impl Behavior for Anon {
            async fn intercept(
                &self,
                _ctx: &InvocationContext,
                _matched: &[Experiment],
            ) -> Result<BehaviorOutcome, EngineError> {
                Ok(BehaviorOutcome::Continue)
            }
        }

        assert_eq!(Anon.name(), "custom");
    }
}
