//! Service provider module for dependency injection.
//!
//! This module contains the ServiceProvider type and related functionality
//! for resolving registered services from the DI container.

use std::sync::Arc;
use std::time::Instant;

use crate::descriptors::ServiceDescriptor;
use crate::internal::with_circular_guard;
use crate::observer::Observers;
use crate::registration::{AnyArc, Registration, Registry};
use crate::traits::ResolverCore;
use crate::{DiError, DiResult, Key, Lifetime};

pub mod context;
pub mod scope;
pub use context::ResolverContext;
pub use scope::{Scope, ScopeId};

/// Service provider for resolving dependencies from the DI container.
///
/// The provider owns the frozen registration table and the container-wide
/// singleton cache. Resolving directly on the provider means resolving
/// *without* a scope: singletons and transients work, scoped roles fail with
/// [`DiError::NoActiveScope`]. Use [`create_scope`](Self::create_scope) or
/// [`with_scope`](Self::with_scope) for a unit of work.
///
/// # Thread Safety
///
/// `ServiceProvider` is `Send + Sync` and cheap to clone (an `Arc` inside).
/// Concurrent first resolutions of a singleton run its producer exactly
/// once; every caller observes the same instance.
///
/// # Examples
///
/// ```
/// use scoped_lifetimes::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// let mut collection = ServiceCollection::new();
/// collection.add_singleton(Database { url: "postgres://localhost".to_string() });
/// collection.add_transient_factory::<UserService, _>(|resolver| {
///     UserService { db: resolver.get_required::<Database>() }
/// });
///
/// let provider = collection.build();
/// let user_service = provider.get_required::<UserService>();
/// assert_eq!(user_service.db.url, "postgres://localhost");
/// ```
#[derive(Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

pub(crate) struct ProviderInner {
    pub(crate) registry: Registry,
    pub(crate) observers: Observers,
}

impl ServiceProvider {
    pub(crate) fn new(registry: Registry, observers: Observers) -> Self {
        Self {
            inner: Arc::new(ProviderInner { registry, observers }),
        }
    }

    #[inline]
    pub(crate) fn inner(&self) -> &ProviderInner {
        &self.inner
    }

    /// Creates a new scope for resolving scoped services.
    ///
    /// The scope ends when the returned value is dropped; its scoped
    /// instances are released then.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_lifetimes::{ServiceCollection, Resolver};
    /// use std::sync::atomic::{AtomicU32, Ordering};
    /// use std::sync::Arc;
    ///
    /// struct RequestId(u32);
    ///
    /// let counter = Arc::new(AtomicU32::new(0));
    /// let c = counter.clone();
    ///
    /// let mut collection = ServiceCollection::new();
    /// collection.add_scoped_factory::<RequestId, _>(move |_| {
    ///     RequestId(c.fetch_add(1, Ordering::SeqCst) + 1)
    /// });
    ///
    /// let provider = collection.build();
    /// let scope1 = provider.create_scope();
    /// let scope2 = provider.create_scope();
    ///
    /// let req1a = scope1.get_required::<RequestId>();
    /// let req1b = scope1.get_required::<RequestId>();
    /// let req2 = scope2.get_required::<RequestId>();
    ///
    /// assert!(Arc::ptr_eq(&req1a, &req1b));
    /// assert!(!Arc::ptr_eq(&req1a, &req2));
    /// assert_eq!((req1a.0, req2.0), (1, 2));
    /// ```
    pub fn create_scope(&self) -> Scope {
        Scope::new(self.clone(), self.inner().registry.scoped_count)
    }

    /// Runs `f` inside a fresh scope and ends the scope when `f` returns,
    /// or unwinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_lifetimes::{ServiceCollection, Resolver};
    ///
    /// struct UnitOfWork;
    ///
    /// let mut collection = ServiceCollection::new();
    /// collection.add_scoped_factory::<UnitOfWork, _>(|_| UnitOfWork);
    /// let provider = collection.build();
    ///
    /// let resolved = provider.with_scope(|scope| scope.get::<UnitOfWork>().is_ok());
    /// assert!(resolved);
    /// ```
    pub fn with_scope<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Scope) -> R,
    {
        let scope = self.create_scope();
        f(&scope)
    }

    /// Number of registrations in the frozen table.
    pub fn registration_count(&self) -> usize {
        self.inner().registry.len()
    }

    /// Whether `key` has a registration.
    pub fn is_registered(&self, key: &Key) -> bool {
        self.inner().registry.contains_key(key)
    }

    /// Snapshot of the registration table, in registration order.
    pub fn service_descriptors(&self) -> Vec<ServiceDescriptor> {
        ServiceDescriptor::from_registry(&self.inner().registry)
    }

    /// Resolves `key` for the given scope (or none), notifying observers.
    pub(crate) fn resolve_in(&self, key: &Key, scope: Option<&Scope>) -> DiResult<AnyArc> {
        let observers = &self.inner().observers;
        if !observers.has_observers() {
            return self.resolve_uninstrumented(key, scope);
        }

        let lifetime = self.inner().registry.get(key).map(|reg| reg.lifetime);
        if let Some(lifetime) = lifetime {
            observers.resolving(key, lifetime);
        }

        let start = Instant::now();
        let result = self.resolve_uninstrumented(key, scope);
        match (&result, lifetime) {
            (Ok(_), Some(lifetime)) => observers.resolved(key, lifetime, start.elapsed()),
            (Err(error), _) => observers.resolution_failed(key, error),
            (Ok(_), None) => {}
        }
        result
    }

    fn resolve_uninstrumented(&self, key: &Key, scope: Option<&Scope>) -> DiResult<AnyArc> {
        with_circular_guard(key, || {
            let reg = self
                .inner()
                .registry
                .get(key)
                .ok_or(DiError::UnregisteredRole(key.display_name()))?;

            match (reg.lifetime, scope) {
                (Lifetime::Singleton, _) => self.resolve_singleton(reg, key),
                (Lifetime::Scoped, Some(scope)) => scope.resolve_scoped(reg, key),
                (Lifetime::Scoped, None) => Err(DiError::NoActiveScope(key.display_name())),
                (Lifetime::Transient, Some(scope)) => (reg.ctor)(&ResolverContext::new(scope)),
                (Lifetime::Transient, None) => (reg.ctor)(&ResolverContext::new(self)),
            }
        })
    }

    /// Singleton resolution through the registration's `OnceCell`.
    ///
    /// `get_or_try_init` blocks concurrent initializers, so the producer
    /// runs once even under a race. A failed producer leaves the cell empty.
    #[inline(always)]
    pub(crate) fn resolve_singleton(&self, reg: &Registration, key: &Key) -> DiResult<AnyArc> {
        let Some(cell) = &reg.single_runtime else {
            // Registrations built as singletons always carry a cell.
            return (reg.ctor)(&ResolverContext::new(self));
        };

        if let Some(value) = cell.get() {
            return Ok(value.clone());
        }

        cell.get_or_try_init(|| {
            let value = (reg.ctor)(&ResolverContext::new(self))?;
            tracing::debug!(role = %key, "singleton instance created");
            Ok(value)
        })
        .cloned()
    }
}

impl ResolverCore for ServiceProvider {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.resolve_in(key, None)
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("registrations", &self.inner().registry.len())
            .field("scoped_slots", &self.inner().registry.scoped_count)
            .finish()
    }
}
