//! Grouping registrations into reusable modules.

use crate::{DiResult, ServiceCollection};

/// A bundle of registrations applied to a [`ServiceCollection`] in one step.
///
/// # Example
///
/// ```rust
/// use scoped_lifetimes::{DiResult, Lifetime, Resolver, ServiceCollection, ServiceCollectionExt, ServiceModule};
///
/// struct RequestCounter(u32);
///
/// struct CountersModule;
///
/// impl ServiceModule for CountersModule {
///     fn register_services(self, services: &mut ServiceCollection) -> DiResult<()> {
///         services.register(Lifetime::Scoped, || RequestCounter(0));
///         Ok(())
///     }
/// }
///
/// # fn main() -> DiResult<()> {
/// let provider = ServiceCollection::new().add_module(CountersModule)?.build();
/// let scope = provider.create_scope();
/// assert_eq!(scope.get::<RequestCounter>()?.0, 0);
/// # Ok(())
/// # }
/// ```
pub trait ServiceModule {
    /// Registers this module's services.
    fn register_services(self, services: &mut ServiceCollection) -> DiResult<()>;
}

/// Chaining helpers for applying [`ServiceModule`]s.
pub trait ServiceCollectionExt: Sized {
    /// Applies `module` and hands the collection back for further chaining.
    fn add_module<M: ServiceModule>(self, module: M) -> DiResult<Self>;

    /// Applies `module` in place.
    fn add_module_mut<M: ServiceModule>(&mut self, module: M) -> DiResult<&mut Self>;
}

impl ServiceCollectionExt for ServiceCollection {
    fn add_module<M: ServiceModule>(mut self, module: M) -> DiResult<Self> {
        self.add_module_mut(module)?;
        Ok(self)
    }

    fn add_module_mut<M: ServiceModule>(&mut self, module: M) -> DiResult<&mut Self> {
        let before = self.len();
        module.register_services(self)?;
        tracing::debug!(
            module = std::any::type_name::<M>(),
            added = self.len().saturating_sub(before),
            "service module applied"
        );
        Ok(self)
    }
}
