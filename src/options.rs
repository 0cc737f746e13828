//! Options pattern: configuration snapshots injected as singletons.
//!
//! A settings type `T` is registered once through [`OptionsBuilder`] and
//! resolved as [`Options<T>`]. The snapshot is built on first resolution,
//! then shared for the life of the provider.

use std::sync::Arc;

use crate::provider::ResolverContext;
use crate::{DiError, Lifetime, ServiceCollection};

/// Read access to a configured options snapshot.
pub trait IOptions<T>: Send + Sync + 'static {
    /// Gets the configured options instance.
    fn get(&self) -> Arc<T>;
}

/// Immutable options snapshot.
///
/// # Examples
///
/// ```
/// use scoped_lifetimes::{Options, Resolver, ServiceCollection};
///
/// #[derive(Default)]
/// struct Banner {
///     title: String,
/// }
///
/// let mut services = ServiceCollection::new();
/// services
///     .add_options::<Banner>()
///     .configure(|_r, banner| banner.title = "Lifetimes".to_string())
///     .register();
///
/// let provider = services.build();
/// let banner = provider.get_required::<Options<Banner>>();
/// assert_eq!(banner.get().title, "Lifetimes");
/// ```
#[derive(Debug)]
pub struct Options<T> {
    inner: Arc<T>,
}

impl<T> Options<T> {
    pub fn new(value: T) -> Self {
        Self { inner: Arc::new(value) }
    }

    pub fn value(&self) -> &Arc<T> {
        &self.inner
    }

    pub fn get(&self) -> Arc<T> {
        self.inner.clone()
    }
}

impl<T> IOptions<T> for Options<T>
where
    T: Send + Sync + 'static,
{
    fn get(&self) -> Arc<T> {
        self.inner.clone()
    }
}

type DefaultFn<T> = Arc<dyn Fn() -> T + Send + Sync>;
type ConfigureFn<T> = Arc<dyn Fn(&ResolverContext, &mut T) + Send + Sync>;
type ValidateFn<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Fluent builder for an [`Options<T>`] registration.
///
/// Steps run in order on first resolution: the default maker (or
/// `T::default()`), every `configure`, every `post_configure`, then every
/// `validate`. The first validation failure is returned as
/// [`DiError::InvalidOptions`] and nothing is cached, so the error repeats
/// on every resolution.
///
/// # Examples
///
/// ```
/// use scoped_lifetimes::{DiError, Options, Resolver, ServiceCollection};
///
/// #[derive(Debug, Default)]
/// struct Limits {
///     max_requests: u32,
/// }
///
/// let mut services = ServiceCollection::new();
/// services
///     .add_options::<Limits>()
///     .validate(|limits| {
///         if limits.max_requests == 0 {
///             Err("max_requests must be > 0".to_string())
///         } else {
///             Ok(())
///         }
///     })
///     .register();
///
/// let provider = services.build();
/// let err = provider.get::<Options<Limits>>().unwrap_err();
/// assert!(matches!(err, DiError::InvalidOptions { .. }));
/// ```
pub struct OptionsBuilder<'a, T>
where
    T: Default + Send + Sync + 'static,
{
    services: &'a mut ServiceCollection,
    default_maker: Option<DefaultFn<T>>,
    configures: Vec<ConfigureFn<T>>,
    post_configures: Vec<ConfigureFn<T>>,
    validates: Vec<ValidateFn<T>>,
}

impl<'a, T> OptionsBuilder<'a, T>
where
    T: Default + Send + Sync + 'static,
{
    fn new(services: &'a mut ServiceCollection) -> Self {
        Self {
            services,
            default_maker: None,
            configures: Vec::new(),
            post_configures: Vec::new(),
            validates: Vec::new(),
        }
    }

    /// Replaces `T::default()` as the starting value.
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.default_maker = Some(Arc::new(f));
        self
    }

    /// Adds a configuration step. Steps may resolve other services, which
    /// are looked up from the root provider.
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResolverContext, &mut T) + Send + Sync + 'static,
    {
        self.configures.push(Arc::new(f));
        self
    }

    /// Adds a step that runs after all `configure` steps.
    pub fn post_configure<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResolverContext, &mut T) + Send + Sync + 'static,
    {
        self.post_configures.push(Arc::new(f));
        self
    }

    pub fn validate<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validates.push(Arc::new(f));
        self
    }

    /// Registers `Options<T>` as a singleton and returns the collection.
    pub fn register(self) -> &'a mut ServiceCollection {
        let OptionsBuilder {
            services,
            default_maker,
            configures,
            post_configures,
            validates,
        } = self;

        services.add_fallible_factory::<Options<T>, _>(Lifetime::Singleton, move |resolver| {
            let mut value = match &default_maker {
                Some(make) => make(),
                None => T::default(),
            };

            for step in configures.iter().chain(post_configures.iter()) {
                step(resolver, &mut value);
            }

            for check in &validates {
                check(&value).map_err(|reason| {
                    tracing::warn!(options = std::any::type_name::<T>(), %reason, "options validation failed");
                    DiError::InvalidOptions {
                        options: std::any::type_name::<T>(),
                        reason,
                    }
                })?;
            }

            Ok(Options::new(value))
        })
    }
}

impl ServiceCollection {
    /// Starts an [`Options<T>`] registration.
    pub fn add_options<T>(&mut self) -> OptionsBuilder<'_, T>
    where
        T: Default + Send + Sync + 'static,
    {
        OptionsBuilder::new(self)
    }
}
