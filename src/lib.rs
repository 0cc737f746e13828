//! # scoped-lifetimes
//!
//! A small dependency injection container with the three classic service
//! lifetimes, and a web sample that shows them side by side.
//!
//! - **Transient**: a new instance on every resolution
//! - **Scoped**: one instance per [`Scope`] (one scope per HTTP request in the web app)
//! - **Singleton**: one instance for the whole [`ServiceProvider`]
//!
//! ## Quick Start
//!
//! ```rust
//! use scoped_lifetimes::{Lifetime, Resolver, ServiceCollection};
//! use std::sync::Arc;
//!
//! struct Clock;
//! struct RequestId(u64);
//!
//! let mut services = ServiceCollection::new();
//! services.register(Lifetime::Singleton, || Clock);
//! services.register(Lifetime::Scoped, || RequestId(7));
//!
//! let provider = services.build();
//! let scope = provider.create_scope();
//!
//! let a = scope.get_required::<RequestId>();
//! let b = scope.get_required::<RequestId>();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! // Singletons resolve without a scope, scoped roles do not.
//! assert!(provider.get::<Clock>().is_ok());
//! assert!(provider.get::<RequestId>().is_err());
//! ```
//!
//! ## The lifetime sample
//!
//! ```rust
//! use scoped_lifetimes::{LifetimeSamplesModule, SampleController, ServiceCollection, ServiceCollectionExt};
//!
//! let provider = ServiceCollection::new().add_module(LifetimeSamplesModule)?.build();
//!
//! let first = provider.with_scope(|scope| SampleController::from_scope(scope))?.report();
//! let second = provider.with_scope(|scope| SampleController::from_scope(scope))?.report();
//!
//! assert_ne!(first.transient.first, first.transient.second);
//! assert_eq!(first.scoped.first, first.scoped.second);
//! assert_ne!(first.scoped.first, second.scoped.first);
//! assert_eq!(first.singleton.first, second.singleton.first);
//! # Ok::<(), scoped_lifetimes::DiError>(())
//! ```

pub mod collection;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod options;
pub mod provider;
pub mod sample;
pub mod traits;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod axum_integration;

// Internal modules
mod internal;
mod registration;

pub use collection::{ServiceCollection, ServiceCollectionExt, ServiceModule};
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult};
pub use key::{key_of_trait, key_of_type, Key};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, TracingObserver};
pub use options::{IOptions, Options, OptionsBuilder};
pub use provider::{ResolverContext, Scope, ScopeId, ServiceProvider};
pub use sample::{
    LifetimeReport, LifetimeSamplesModule, PairReport, SampleController, SampleService, ScopedService,
    SingletonService, TransientService,
};
pub use traits::{Resolver, ResolverCore};
