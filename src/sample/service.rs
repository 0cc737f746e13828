use std::sync::Arc;

use uuid::Uuid;

use crate::{DiResult, Lifetime, ServiceCollection, ServiceModule};

/// Role resolved fresh on every request for it.
pub trait TransientService: Send + Sync {
    fn current_guid(&self) -> Uuid;
}

/// Role shared within one scope.
pub trait ScopedService: Send + Sync {
    fn current_guid(&self) -> Uuid;
}

/// Role shared by the whole process.
pub trait SingletonService: Send + Sync {
    fn current_guid(&self) -> Uuid;
}

/// A service whose only state is the identifier it was created with.
///
/// Two handles with the same identifier are the same instance, which is all
/// the lifetime sample needs to observe.
///
/// ```
/// use scoped_lifetimes::SampleService;
///
/// let a = SampleService::new();
/// let b = SampleService::new();
/// assert_ne!(a.current_guid(), b.current_guid());
/// ```
#[derive(Debug)]
pub struct SampleService {
    guid: Uuid,
}

impl SampleService {
    pub fn new() -> Self {
        Self { guid: Uuid::new_v4() }
    }

    pub fn current_guid(&self) -> Uuid {
        self.guid
    }
}

impl Default for SampleService {
    fn default() -> Self {
        Self::new()
    }
}

impl TransientService for SampleService {
    fn current_guid(&self) -> Uuid {
        self.guid
    }
}

impl ScopedService for SampleService {
    fn current_guid(&self) -> Uuid {
        self.guid
    }
}

impl SingletonService for SampleService {
    fn current_guid(&self) -> Uuid {
        self.guid
    }
}

/// Registers [`SampleService`] under its three roles.
///
/// ```
/// use scoped_lifetimes::{LifetimeSamplesModule, Resolver, ScopedService, ServiceCollection, ServiceCollectionExt};
///
/// let provider = ServiceCollection::new()
///     .add_module(LifetimeSamplesModule)
///     .unwrap()
///     .build();
///
/// let scope = provider.create_scope();
/// let a = scope.get_required_trait::<dyn ScopedService>();
/// let b = scope.get_required_trait::<dyn ScopedService>();
/// assert_eq!(a.current_guid(), b.current_guid());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LifetimeSamplesModule;

impl ServiceModule for LifetimeSamplesModule {
    fn register_services(self, services: &mut ServiceCollection) -> DiResult<()> {
        services
            .register_trait::<dyn TransientService, _>(Lifetime::Transient, || Arc::new(SampleService::new()))
            .register_trait::<dyn ScopedService, _>(Lifetime::Scoped, || Arc::new(SampleService::new()))
            .register_trait::<dyn SingletonService, _>(Lifetime::Singleton, || Arc::new(SampleService::new()));
        Ok(())
    }
}
