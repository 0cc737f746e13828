//! Service descriptors for introspection and diagnostics.

use serde::Serialize;

use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::registration::Registry;

/// Service descriptor for introspection and diagnostics
///
/// A read-only view of one registration: which role, which lifetime, and
/// (when known) the concrete type behind it.
///
/// # Examples
///
/// ```rust
/// use scoped_lifetimes::{ServiceCollection, Lifetime};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {}
/// struct SystemClock;
/// impl Clock for SystemClock {}
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(42u32);
/// services.add_scoped_trait_factory::<dyn Clock, _>(|_| Arc::new(SystemClock));
///
/// let descriptors = services.get_service_descriptors();
/// assert_eq!(descriptors.len(), 2);
/// assert_eq!(descriptors[0].type_name(), "u32");
/// assert_eq!(descriptors[0].lifetime, Lifetime::Singleton);
/// assert!(descriptors[1].is_trait());
/// assert_eq!(descriptors[1].lifetime, Lifetime::Scoped);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    /// The service key
    #[serde(skip)]
    pub key: Key,
    /// Role name (type or trait)
    pub role: &'static str,
    /// Service lifetime
    pub lifetime: Lifetime,
    /// Implementation type name (if available)
    pub impl_type_name: Option<&'static str>,
}

impl ServiceDescriptor {
    pub(crate) fn from_registry(registry: &Registry) -> Vec<Self> {
        registry
            .iter()
            .map(|(key, reg)| ServiceDescriptor {
                key: *key,
                role: key.display_name(),
                lifetime: reg.lifetime,
                impl_type_name: reg.impl_type_name,
            })
            .collect()
    }

    /// Get the type/trait name
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    pub fn is_trait(&self) -> bool {
        self.key.is_trait()
    }
}
