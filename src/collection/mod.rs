//! Service collection module for dependency injection.
//!
//! This module contains the ServiceCollection type and related functionality
//! for registering services and building service providers.

use std::sync::Arc;

use crate::key::{key_of_trait, key_of_type};
use crate::observer::Observers;
use crate::provider::ResolverContext;
use crate::registration::{AnyArc, Ctor, Registration, Registry};
use crate::{DiObserver, DiResult, Key, Lifetime, ServiceDescriptor, ServiceProvider};

pub mod module_system;
pub use module_system::*;

/// Mutable registration table, turned into a [`ServiceProvider`] by [`build`](Self::build).
///
/// Registering the same role twice replaces the earlier registration (last
/// registration wins). Use the `try_register*` methods to keep the first one
/// instead.
#[derive(Default)]
pub struct ServiceCollection {
    registry: Registry,
    observers: Observers,
}

impl ServiceCollection {
    /// Creates a new empty service collection.
    pub fn new() -> Self {
        Self::default()
    }

    // ----- Producer Registrations -----

    /// Registers a no-argument producer for `T` under the given lifetime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scoped_lifetimes::{Lifetime, Resolver, ServiceCollection};
    /// use std::sync::Arc;
    ///
    /// struct Token(u64);
    ///
    /// let mut services = ServiceCollection::new();
    /// services.register(Lifetime::Transient, || Token(7));
    ///
    /// let provider = services.build();
    /// let a = provider.get_required::<Token>();
    /// let b = provider.get_required::<Token>();
    /// assert!(!Arc::ptr_eq(&a, &b));
    /// ```
    pub fn register<T, F>(&mut self, lifetime: Lifetime, producer: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.add_factory(lifetime, move |_: &ResolverContext| producer())
    }

    /// Registers a no-argument producer for the trait role `Trait`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scoped_lifetimes::{Lifetime, Resolver, ServiceCollection};
    /// use std::sync::Arc;
    ///
    /// trait Clock: Send + Sync {}
    /// struct SystemClock;
    /// impl Clock for SystemClock {}
    ///
    /// let mut services = ServiceCollection::new();
    /// services.register_trait::<dyn Clock, _>(Lifetime::Singleton, || Arc::new(SystemClock));
    ///
    /// let provider = services.build();
    /// let a = provider.get_required_trait::<dyn Clock>();
    /// let b = provider.get_required_trait::<dyn Clock>();
    /// assert!(Arc::ptr_eq(&a, &b));
    /// ```
    pub fn register_trait<Trait, F>(&mut self, lifetime: Lifetime, producer: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        F: Fn() -> Arc<Trait> + Send + Sync + 'static,
    {
        self.add_trait_factory_impl(lifetime, move |_: &ResolverContext| producer())
    }

    /// Like [`register`](Self::register), but keeps an existing registration
    /// for `T`. Returns whether the producer was registered.
    pub fn try_register<T, F>(&mut self, lifetime: Lifetime, producer: F) -> bool
    where
        T: 'static + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        if self.contains::<T>() {
            return false;
        }
        self.register(lifetime, producer);
        true
    }

    /// Like [`register_trait`](Self::register_trait), but keeps an existing
    /// registration for `Trait`.
    pub fn try_register_trait<Trait, F>(&mut self, lifetime: Lifetime, producer: F) -> bool
    where
        Trait: ?Sized + 'static + Send + Sync,
        F: Fn() -> Arc<Trait> + Send + Sync + 'static,
    {
        if self.contains_key(&key_of_trait::<Trait>()) {
            return false;
        }
        self.register_trait(lifetime, producer);
        true
    }

    // ----- Concrete Type Registrations -----

    /// Registers a singleton instance that will be shared across the entire application.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use scoped_lifetimes::ServiceCollection;
    /// struct Config {
    ///     database_url: String
    /// }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton(Config {
    ///     database_url: "postgres://localhost".to_string()
    /// });
    /// ```
    pub fn add_singleton<T: 'static + Send + Sync>(&mut self, value: T) -> &mut Self {
        let arc = Arc::new(value);
        let ctor: Ctor = Arc::new(move |_: &ResolverContext| -> DiResult<AnyArc> { Ok(arc.clone()) });
        self.insert(
            key_of_type::<T>(),
            Registration::new(Lifetime::Singleton, ctor, Some(std::any::type_name::<T>())),
        );
        self
    }

    /// Registers a singleton factory that creates the instance on first request.
    ///
    /// The factory runs once per provider, even when several threads race for
    /// the first instance. It resolves its own dependencies from the root
    /// provider.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use scoped_lifetimes::{ServiceCollection, Resolver};
    /// # use std::sync::Arc;
    /// struct Database { url: String }
    /// struct UserService { db: Arc<Database> }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton(Database { url: "postgres://localhost".to_string() });
    /// services.add_singleton_factory::<UserService, _>(|resolver| {
    ///     UserService {
    ///         db: resolver.get_required::<Database>()
    ///     }
    /// });
    /// ```
    pub fn add_singleton_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Singleton, factory)
    }

    /// Registers a scoped factory that creates one instance per scope.
    pub fn add_scoped_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Scoped, factory)
    }

    /// Registers a transient factory that creates a new instance on every request.
    pub fn add_transient_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Transient, factory)
    }

    fn add_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |r: &ResolverContext| -> DiResult<AnyArc> { Ok(Arc::new(factory(r))) });
        self.insert(
            key_of_type::<T>(),
            Registration::new(lifetime, ctor, Some(std::any::type_name::<T>())),
        );
        self
    }

    /// Registers a factory whose failures surface as resolution errors
    /// instead of panics.
    ///
    /// ```rust
    /// use scoped_lifetimes::{DiError, Lifetime, Resolver, ServiceCollection};
    ///
    /// struct Port(u16);
    /// struct Listener { port: u16 }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_fallible_factory::<Listener, _>(Lifetime::Singleton, |r| {
    ///     Ok(Listener { port: r.get::<Port>()?.0 })
    /// });
    ///
    /// let provider = services.build();
    /// assert!(matches!(provider.get::<Listener>(), Err(DiError::UnregisteredRole(_))));
    /// ```
    pub fn add_fallible_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> DiResult<T> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |r: &ResolverContext| -> DiResult<AnyArc> { Ok(Arc::new(factory(r)?)) });
        self.insert(
            key_of_type::<T>(),
            Registration::new(lifetime, ctor, Some(std::any::type_name::<T>())),
        );
        self
    }

    // ----- Trait Registrations -----

    /// Registers a singleton trait implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use scoped_lifetimes::{ServiceCollection, Resolver};
    /// # use std::sync::Arc;
    /// trait Logger: Send + Sync {
    ///     fn log(&self, message: &str);
    /// }
    ///
    /// struct NullLogger;
    /// impl Logger for NullLogger {
    ///     fn log(&self, _message: &str) {}
    /// }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_singleton_trait::<dyn Logger>(Arc::new(NullLogger));
    /// ```
    pub fn add_singleton_trait<T>(&mut self, value: Arc<T>) -> &mut Self
    where
        T: ?Sized + 'static + Send + Sync,
    {
        // Stored as Arc<Arc<dyn Trait>> inside the type-erased slot
        let any_arc: AnyArc = Arc::new(value);
        let ctor: Ctor = Arc::new(move |_: &ResolverContext| -> DiResult<AnyArc> { Ok(any_arc.clone()) });
        self.insert(key_of_trait::<T>(), Registration::new(Lifetime::Singleton, ctor, None));
        self
    }

    /// Registers a singleton trait factory.
    pub fn add_singleton_trait_factory<Trait, F>(&mut self, factory: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<Trait> + Send + Sync + 'static,
    {
        self.add_trait_factory_impl(Lifetime::Singleton, factory)
    }

    /// Registers a scoped trait factory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use scoped_lifetimes::{ServiceCollection, Resolver};
    /// # use std::sync::Arc;
    /// trait RequestLogger: Send + Sync {
    ///     fn request_id(&self) -> &str;
    /// }
    ///
    /// struct Prefixed(String);
    /// impl RequestLogger for Prefixed {
    ///     fn request_id(&self) -> &str { &self.0 }
    /// }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_scoped_trait_factory::<dyn RequestLogger, _>(|_| {
    ///     Arc::new(Prefixed("req-456".to_string()))
    /// });
    ///
    /// let provider = services.build();
    /// let scope = provider.create_scope();
    /// assert_eq!(scope.get_required_trait::<dyn RequestLogger>().request_id(), "req-456");
    /// ```
    pub fn add_scoped_trait_factory<Trait, F>(&mut self, factory: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<Trait> + Send + Sync + 'static,
    {
        self.add_trait_factory_impl(Lifetime::Scoped, factory)
    }

    /// Registers a transient trait factory.
    pub fn add_transient_trait_factory<Trait, F>(&mut self, factory: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<Trait> + Send + Sync + 'static,
    {
        self.add_trait_factory_impl(Lifetime::Transient, factory)
    }

    fn add_trait_factory_impl<Trait, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<Trait> + Send + Sync + 'static,
    {
        let ctor: Ctor = Arc::new(move |r: &ResolverContext| -> DiResult<AnyArc> { Ok(Arc::new(factory(r))) });
        self.insert(key_of_trait::<Trait>(), Registration::new(lifetime, ctor, None));
        self
    }

    // ----- Introspection -----

    /// Whether a concrete type `T` is registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.registry.contains_key(&key_of_type::<T>())
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.registry.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// How many registrations were replaced by a later one for the same role.
    pub fn replaced_count(&self) -> usize {
        self.registry.replaced
    }

    /// Get all service descriptors for introspection and diagnostics, in
    /// registration order.
    pub fn get_service_descriptors(&self) -> Vec<ServiceDescriptor> {
        ServiceDescriptor::from_registry(&self.registry)
    }

    // ----- Observers -----

    /// Adds a resolution observer to the provider built from this collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_lifetimes::{ServiceCollection, TracingObserver};
    /// use std::sync::Arc;
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_observer(Arc::new(TracingObserver::new()));
    /// ```
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    // ----- Build -----

    /// Freezes the registration table and builds the provider.
    pub fn build(mut self) -> ServiceProvider {
        self.registry.finalize();
        tracing::debug!(
            registrations = self.registry.len(),
            scoped_slots = self.registry.scoped_count,
            replaced = self.registry.replaced,
            "service provider built"
        );
        ServiceProvider::new(self.registry, self.observers)
    }

    fn insert(&mut self, key: Key, registration: Registration) {
        let lifetime = registration.lifetime;
        if let Some(previous) = self.registry.insert(key, registration) {
            tracing::debug!(
                role = %key,
                previous = previous.as_str(),
                lifetime = lifetime.as_str(),
                "registration replaced, last registration wins"
            );
        }
    }
}
