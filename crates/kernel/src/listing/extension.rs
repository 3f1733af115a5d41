//! Criteria hooks for site-specific listing customization.
//!
//! Hooks see the resolved [`ListingCriteria`] and the raw request parameters
//! before the content store runs, and may rewrite the criteria (add a facet,
//! change ordering, pin a content type). They run in weight order (lower
//! weight runs first). The response contract is unaffected: the listing
//! service re-clamps the page window after every hook has run.

use std::sync::Arc;

use super::criteria::ListingCriteria;
use super::params::RawParams;

/// A hook that may alter listing criteria before execution.
pub trait CriteriaHook: Send + Sync {
    /// Hook name for logging.
    fn name(&self) -> &str;

    /// Inspect or modify the criteria.
    fn alter(&self, criteria: &mut ListingCriteria, raw: &RawParams);
}

/// A registered hook with its priority.
#[derive(Clone)]
struct HookRegistration {
    weight: i32,
    hook: Arc<dyn CriteriaHook>,
}

/// Ordered collection of criteria hooks.
#[derive(Clone, Default)]
pub struct CriteriaHookRegistry {
    hooks: Vec<HookRegistration>,
}

impl CriteriaHookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook. Hooks with equal weight run in registration order.
    pub fn register(&mut self, weight: i32, hook: Arc<dyn CriteriaHook>) {
        tracing::debug!(hook = hook.name(), weight, "registered criteria hook");
        self.hooks.push(HookRegistration { weight, hook });
        self.hooks.sort_by_key(|registration| registration.weight);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, weight: i32, hook: Arc<dyn CriteriaHook>) -> Self {
        self.register(weight, hook);
        self
    }

    /// Run every hook against the criteria.
    pub fn apply(&self, criteria: &mut ListingCriteria, raw: &RawParams) {
        for registration in &self.hooks {
            registration.hook.alter(criteria, raw);
            tracing::trace!(hook = registration.hook.name(), ?criteria, "criteria hook applied");
        }
    }

    /// Names of registered hooks, in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|r| r.hook.name()).collect()
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for CriteriaHookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CriteriaHookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}
