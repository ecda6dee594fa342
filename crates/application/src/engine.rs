//! The fault-injection decision engine
//!
//! One invocation flows through four stages: fetch the experiments registered
//! for the checkpoint, match them against the invocation labels, dispatch to
//! a custom behavior if one is attached, and otherwise execute the first
//! matching experiment's effect.

use std::sync::Arc;
use std::time::Duration;

use domain::Experiment;
use tracing::{debug, instrument};

use crate::behavior::BehaviorOutcome;
use crate::error::EngineError;
use crate::executor;
use crate::invocation::{InvocationContext, InvocationResult};
use crate::ports::ExperimentSource;

const DEFAULT_MAX_LATENCY: Duration = Duration::from_secs(5);

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Master switch; a disabled engine reports every invocation inactive
    pub enabled: bool,
    /// Upper bound any latency effect is clamped to
    pub max_latency: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_latency: DEFAULT_MAX_LATENCY,
        }
    }
}

/// Request-scoped fault-injection engine
///
/// Stateless across invocations: every decision is a pure function of the
/// context and the experiment set current at fetch time, so concurrent
/// invocations never observe each other.
pub struct InjectionEngine {
    source: Arc<dyn ExperimentSource>,
    config: EngineConfig,
}

impl InjectionEngine {
    /// Create an engine with default configuration
    #[must_use]
    pub fn new(source: Arc<dyn ExperimentSource>) -> Self {
        Self {
            source,
            config: EngineConfig::default(),
        }
    }

    /// Override the configuration (builder style)
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate one invocation against the current experiment set
    ///
    /// Returns the matched experiments and the impact applied, or the
    /// injected fault when an `Exception` effect fires. When multiple
    /// experiments match, only the first one's effect is executed; the full
    /// matched list is reported either way.
    ///
    /// # Errors
    ///
    /// [`EngineError::Injected`] when an `Exception` effect fires, and
    /// [`EngineError::Behavior`] when an attached behavior fails.
    #[instrument(
        skip(self, ctx),
        fields(checkpoint = %ctx.checkpoint(), invocation_id = %ctx.invocation_id())
    )]
    pub async fn invoke(&self, ctx: &InvocationContext) -> Result<InvocationResult, EngineError> {
        if !self.config.enabled {
            debug!("engine disabled, skipping");
            return Ok(InvocationResult::inactive());
        }

        let experiments = self.source.fetch(ctx.checkpoint()).await;
        let matched: Vec<Experiment> = experiments
            .into_iter()
            .filter(|exp| exp.targets(ctx.labels()))
            .collect();

        if matched.is_empty() {
            debug!("no experiment matched");
            return Ok(InvocationResult::inactive());
        }
        debug!(
            matched = matched.len(),
            first = %matched[0].id,
            "experiments matched"
        );

        if let Some(behavior) = ctx.behavior() {
            match behavior.intercept(ctx, &matched).await? {
                BehaviorOutcome::Handled(impact) => {
                    debug!(behavior = behavior.name(), "behavior handled match");
                    return Ok(InvocationResult::matched(matched, impact));
                }
                BehaviorOutcome::Continue => {
                    debug!(behavior = behavior.name(), "behavior declined, using default");
                }
            }
        }

        let effect = matched[0].effect.clone();
        debug!(effect = effect.name(), experiment = %matched[0].id, "executing effect");
        let impact = executor::execute(&effect, self.config.max_latency).await?;
        Ok(InvocationResult::matched(matched, impact))
    }
}

// Manual impl: the source is not Debug.
impl std::fmt::Debug for InjectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
