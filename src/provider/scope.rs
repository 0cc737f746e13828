//! Scoped service resolution and lifecycle management.
//!
//! A [`Scope`] is one unit of work (typically one HTTP request). It owns a
//! private cell per scoped registration and releases them when dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::OnceCell;
use serde::Serialize;

use super::{ResolverContext, ServiceProvider};
use crate::registration::{AnyArc, Registration};
use crate::traits::ResolverCore;
use crate::{DiResult, Key};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScopeId(u64);

impl ScopeId {
    fn next() -> Self {
        Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope-{}", self.0)
    }
}

/// Scoped service container for request-scoped dependency resolution.
///
/// # Lifetime Behavior
///
/// - **Singleton**: Resolved and cached in the root provider (shared across all scopes)
/// - **Scoped**: Resolved and cached within this specific scope
/// - **Transient**: Created fresh on every resolution (no caching)
///
/// Resolving the same scoped role concurrently on one scope is safe: the
/// slot is a `OnceCell`, so the producer still runs once for the scope.
///
/// # Examples
///
/// ```
/// use scoped_lifetimes::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct DatabaseConnection(String);
///
/// struct UserService {
///     db: Arc<DatabaseConnection>,
/// }
///
/// let mut collection = ServiceCollection::new();
/// collection.add_scoped_factory::<DatabaseConnection, _>(|_| {
///     DatabaseConnection("connection-123".to_string())
/// });
/// collection.add_transient_factory::<UserService, _>(|resolver| {
///     UserService {
///         db: resolver.get_required::<DatabaseConnection>(),
///     }
/// });
///
/// let provider = collection.build();
/// let scope = provider.create_scope();
///
/// let user1 = scope.get_required::<UserService>();
/// let user2 = scope.get_required::<UserService>();
/// assert!(Arc::ptr_eq(&user1.db, &user2.db));
/// ```
pub struct Scope {
    id: ScopeId,
    root: ServiceProvider,
    scoped_cells: Box<[OnceCell<AnyArc>]>,
}

impl Scope {
    pub(crate) fn new(root: ServiceProvider, scoped_count: usize) -> Self {
        let scoped_cells: Box<[OnceCell<AnyArc>]> = (0..scoped_count)
            .map(|_| OnceCell::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        let id = ScopeId::next();
        tracing::debug!(scope = %id, "scope started");

        Self {
            id,
            root,
            scoped_cells,
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// The root provider this scope was created from.
    pub fn provider(&self) -> &ServiceProvider {
        &self.root
    }

    /// How many scoped roles have been resolved in this scope so far.
    pub fn resolved_count(&self) -> usize {
        self.scoped_cells.iter().filter(|cell| cell.get().is_some()).count()
    }

    pub(crate) fn resolve_scoped(&self, reg: &Registration, key: &Key) -> DiResult<AnyArc> {
        let Some(cell) = reg.scoped_slot.and_then(|slot| self.scoped_cells.get(slot)) else {
            // Scoped registrations get a slot when the provider is built.
            debug_assert!(false, "scoped registration without a slot: {key}");
            return (reg.ctor)(&ResolverContext::new(self));
        };

        if let Some(value) = cell.get() {
            return Ok(value.clone());
        }

        cell.get_or_try_init(|| {
            let value = (reg.ctor)(&ResolverContext::new(self))?;
            tracing::trace!(scope = %self.id, role = %key, "scoped instance created");
            Ok(value)
        })
        .cloned()
    }
}

impl ResolverCore for Scope {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.root.resolve_in(key, Some(self))
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        tracing::debug!(scope = %self.id, instances = self.resolved_count(), "scope ended");
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id)
            .field("resolved", &self.resolved_count())
            .finish()
    }
}
