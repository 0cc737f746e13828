//! Service lifetime definitions.

use serde::Serialize;
use std::fmt;

/// Service lifetimes controlling instance caching behavior
///
/// Decides how long a resolved instance is reused before the producer runs
/// again.
///
/// # Examples
///
/// ```rust
/// use scoped_lifetimes::{ServiceCollection, Resolver};
///
/// struct Database { url: String }
/// struct Repository { db_url: String }
/// struct RequestModel { id: u32 }
///
/// let mut services = ServiceCollection::new();
///
/// // Singleton: One instance for entire application
/// services.add_singleton(Database {
///     url: "postgres://localhost".to_string()
/// });
///
/// // Scoped: One instance per request/scope
/// services.add_scoped_factory::<Repository, _>(|r| {
///     let db = r.get_required::<Database>();
///     Repository { db_url: db.url.clone() }
/// });
///
/// // Transient: New instance every time
/// services.add_transient_factory::<RequestModel, _>(|_| RequestModel { id: 7 });
///
/// let provider = services.build();
///
/// let db1 = provider.get_required::<Database>();
/// let scope1 = provider.create_scope();
/// let db2 = scope1.get_required::<Database>();
/// assert!(std::ptr::eq(&*db1, &*db2));
///
/// let repo1a = scope1.get_required::<Repository>();
/// let repo1b = scope1.get_required::<Repository>();
/// assert!(std::ptr::eq(&*repo1a, &*repo1b));
///
/// let scope2 = provider.create_scope();
/// let repo2 = scope2.get_required::<Repository>();
/// assert!(!std::ptr::eq(&*repo1a, &*repo2));
///
/// let model1 = scope1.get_required::<RequestModel>();
/// let model2 = scope1.get_required::<RequestModel>();
/// assert!(!std::ptr::eq(&*model1, &*model2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// Single instance per root provider, cached forever
    ///
    /// Created on first request from any scope (or from the root) and shared
    /// by every thread afterwards.
    Singleton,
    /// Single instance per scope, cached for scope lifetime
    ///
    /// Requires an active scope. Two resolutions inside one scope return the
    /// same instance; different scopes never share one.
    Scoped,
    /// New instance per resolution, never cached
    Transient,
}

impl Lifetime {
    /// All lifetimes, longest-lived first.
    pub const ALL: [Lifetime; 3] = [Lifetime::Singleton, Lifetime::Scoped, Lifetime::Transient];

    /// Short lowercase label used in logs and rendered views.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Singleton => "singleton",
            Lifetime::Scoped => "scoped",
            Lifetime::Transient => "transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Lifetime::Singleton => "Singleton",
            Lifetime::Scoped => "Scoped",
            Lifetime::Transient => "Transient",
        };
        f.write_str(label)
    }
}
