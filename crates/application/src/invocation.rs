//! Invocation context and result
//!
//! An [`InvocationContext`] is created at an instrumented call site (a
//! checkpoint) and handed to the engine; the [`InvocationResult`] tells the
//! call site what, if anything, was done to it.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{Experiment, Impact, Labels};
use uuid::Uuid;

use crate::behavior::Behavior;

/// A single pass through an instrumented checkpoint
///
/// Carries the checkpoint name, the targeting labels, and optionally a
/// caller-supplied [`Behavior`] that takes precedence over default effect
/// execution. Each invocation gets a unique id for log correlation.
///
/// # Examples
///
/// ```
/// use application::InvocationContext;
///
/// let ctx = InvocationContext::new("list_s3_bucket")
///     .with_label("path", "images/2024/");
///
/// assert_eq!(ctx.checkpoint(), "list_s3_bucket");
/// assert_eq!(ctx.labels().get("path"), Some("images/2024/"));
/// ```
#[derive(Clone)]
pub struct InvocationContext {
    checkpoint: String,
    labels: Labels,
    behavior: Option<Arc<dyn Behavior>>,
    invocation_id: Uuid,
    created_at: DateTime<Utc>,
}

impl InvocationContext {
    /// Create a context for the named checkpoint with no labels
    #[must_use]
    pub fn new(checkpoint: impl Into<String>) -> Self {
        Self {
            checkpoint: checkpoint.into(),
            labels: Labels::new(),
            behavior: None,
            invocation_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    /// Add a targeting label (builder style)
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key, value);
        self
    }

    /// Replace the full label set
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Attach a custom behavior that runs instead of default execution
    #[must_use]
    pub fn with_behavior(mut self, behavior: Arc<dyn Behavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Checkpoint name this invocation passes through
    #[must_use]
    pub fn checkpoint(&self) -> &str {
        &self.checkpoint
    }

    /// Targeting labels
    #[must_use]
    pub const fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Caller-supplied behavior, if any
    #[must_use]
    pub fn behavior(&self) -> Option<&Arc<dyn Behavior>> {
        self.behavior.as_ref()
    }

    /// Unique id for log correlation
    #[must_use]
    pub const fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    /// When this context was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// Manual impl: `dyn Behavior` is not Debug, show its name instead.
impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("checkpoint", &self.checkpoint)
            .field("labels", &self.labels)
            .field("behavior", &self.behavior.as_ref().map(|b| b.name()))
            .field("invocation_id", &self.invocation_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// What the engine did to an invocation
///
/// Invariant: `impact.is_some()` implies `active`. An active result with no
/// impact means experiments matched but none changed the invocation (for
/// example a custom behavior chose not to act).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Whether any experiment matched this invocation
    pub active: bool,
    /// The effect actually applied, if one was
    pub impact: Option<Impact>,
    /// Every experiment that matched, in source order
    pub matched: Vec<Experiment>,
}

impl InvocationResult {
    /// Result for an invocation nothing matched
    #[must_use]
    pub const fn inactive() -> Self {
        Self {
            active: false,
            impact: None,
            matched: Vec::new(),
        }
    }

    /// Result for an invocation with matches
    #[must_use]
    pub fn matched(matched: Vec<Experiment>, impact: Option<Impact>) -> Self {
        debug_assert!(!matched.is_empty());
        Self {
            active: true,
            impact,
            matched,
        }
    }

    /// Whether an effect was applied
    #[must_use]
    pub const fn impacted(&self) -> bool {
        self.impact.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_unique_id() {
        let a = InvocationContext::new("cp");
        let b = InvocationContext::new("cp");
        assert_ne!(a.invocation_id(), b.invocation_id());
    }

    #[test]
    fn builder_collects_labels() {
        let ctx = InvocationContext::new("list_s3_bucket")
            .with_label("path", "img/")
            .with_label("region", "eu-central-1");
        assert_eq!(ctx.labels().len(), 2);
        assert_eq!(ctx.labels().get("region"), Some("eu-central-1"));
    }

    #[test]
    fn with_labels_replaces_set() {
        let ctx = InvocationContext::new("cp")
            .with_label("old", "1")
            .with_labels(Labels::new().with("new", "2"));
        assert!(!ctx.labels().contains("old"));
        assert_eq!(ctx.labels().get("new"), Some("2"));
    }

    #[test]
    fn debug_omits_behavior_internals() {
        let ctx = InvocationContext::new("cp");
        let debug = format!("{ctx:?}");
        assert!(debug.contains("checkpoint"));
        assert!(debug.contains("behavior"));
        assert!(debug.contains("None"));
    }

    #[test]
    fn inactive_result_has_no_impact() {
        let result = InvocationResult::inactive();
        assert!(!result.active);
        assert!(!result.impacted());
        assert!(result.matched.is_empty());
    }
}
