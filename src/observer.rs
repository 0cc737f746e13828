//! Diagnostic observers for dependency injection traceability.
//!
//! Observers see every resolution that reaches a producer or a cache, which is
//! how the demo shows *when* each lifetime actually constructs something.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::Key;
use crate::lifetime::Lifetime;

/// Observer trait for dependency injection resolution events.
///
/// Calls are made synchronously on the resolving thread. Keep implementations
/// lightweight.
///
/// # Examples
///
/// ```
/// use scoped_lifetimes::{DiError, DiObserver, Key, Lifetime, Resolver, ServiceCollection};
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct CountingObserver {
///     resolved: AtomicU64,
/// }
///
/// impl DiObserver for CountingObserver {
///     fn resolving(&self, _key: &Key, _lifetime: Lifetime) {}
///
///     fn resolved(&self, _key: &Key, _lifetime: Lifetime, _duration: Duration) {
///         self.resolved.fetch_add(1, Ordering::Relaxed);
///     }
///
///     fn resolution_failed(&self, _key: &Key, _error: &DiError) {}
/// }
///
/// let observer = Arc::new(CountingObserver::default());
/// let mut services = ServiceCollection::new();
/// services.add_singleton(1u8);
/// services.add_observer(observer.clone());
///
/// let provider = services.build();
/// provider.get_required::<u8>();
/// assert_eq!(observer.resolved.load(Ordering::Relaxed), 1);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a registered role is resolved.
    fn resolving(&self, key: &Key, lifetime: Lifetime);

    /// Called after a role resolved successfully, with the time spent
    /// (including any producer invocation).
    fn resolved(&self, key: &Key, lifetime: Lifetime, duration: Duration);

    /// Called when resolution fails, including for roles that were never
    /// registered.
    fn resolution_failed(&self, key: &Key, error: &DiError);
}

/// Collection of observers attached to a provider.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline(always)]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, key: &Key, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.resolving(key, lifetime);
        }
    }

    pub(crate) fn resolved(&self, key: &Key, lifetime: Lifetime, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, lifetime, duration);
        }
    }

    pub(crate) fn resolution_failed(&self, key: &Key, error: &DiError) {
        for observer in &self.observers {
            observer.resolution_failed(key, error);
        }
    }
}

/// Observer that emits `tracing` events.
///
/// Successful resolutions are logged at `TRACE` under the
/// `scoped_lifetimes::resolve` target; failures at `WARN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl DiObserver for TracingObserver {
    fn resolving(&self, key: &Key, lifetime: Lifetime) {
        tracing::trace!(target: "scoped_lifetimes::resolve", role = %key, lifetime = lifetime.as_str(), "resolving");
    }

    fn resolved(&self, key: &Key, lifetime: Lifetime, duration: Duration) {
        tracing::trace!(
            target: "scoped_lifetimes::resolve",
            role = %key,
            lifetime = lifetime.as_str(),
            elapsed_us = duration.as_micros() as u64,
            "resolved"
        );
    }

    fn resolution_failed(&self, key: &Key, error: &DiError) {
        tracing::warn!(target: "scoped_lifetimes::resolve", role = %key, kind = error.kind(), %error, "resolution failed");
    }
}
