//! Service registration types.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;

pub(crate) use crate::provider::ResolverContext;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type Ctor = Arc<dyn for<'a> Fn(&ResolverContext<'a>) -> DiResult<AnyArc> + Send + Sync>;

/// Service registration with lifetime and constructor
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) ctor: Ctor,
    /// Implementation type name for diagnostics, when the producer's output type is known
    pub(crate) impl_type_name: Option<&'static str>,
    /// Singleton cache; initialized at most once per provider
    pub(crate) single_runtime: Option<OnceCell<AnyArc>>,
    /// Scoped slot index into each scope's cell array
    pub(crate) scoped_slot: Option<usize>,
}

impl Registration {
    pub(crate) fn new(lifetime: Lifetime, ctor: Ctor, impl_type_name: Option<&'static str>) -> Self {
        let single_runtime = match lifetime {
            Lifetime::Singleton => Some(OnceCell::new()),
            _ => None,
        };

        Self {
            lifetime,
            ctor,
            impl_type_name,
            single_runtime,
            scoped_slot: None,
        }
    }
}

/// Service registry holding all registrations in registration order
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<(Key, Registration)>,
    index: HashMap<Key, usize>,
    /// Number of scoped registrations, i.e. the slot count of every scope
    pub(crate) scoped_count: usize,
    /// How many registrations were overwritten by a later one for the same key
    pub(crate) replaced: usize,
}

impl Registry {
    /// Inserts a registration. Last registration for a key wins; returns the
    /// lifetime of the replaced registration, if any.
    pub(crate) fn insert(&mut self, key: Key, registration: Registration) -> Option<Lifetime> {
        match self.index.get(&key) {
            Some(&pos) => {
                let previous = self.entries[pos].1.lifetime;
                self.entries[pos] = (key, registration);
                self.replaced += 1;
                Some(previous)
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, registration));
                None
            }
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&Registration> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key, &Registration)> {
        self.entries.iter().map(|(k, r)| (k, r))
    }

    /// Assigns scoped slot indices. Called once, right before the provider is built.
    pub(crate) fn finalize(&mut self) {
        let mut next_scoped_slot = 0;
        for (_, reg) in &mut self.entries {
            if reg.lifetime == Lifetime::Scoped {
                reg.scoped_slot = Some(next_scoped_slot);
                next_scoped_slot += 1;
            }
        }
        self.scoped_count = next_scoped_slot;
    }
}
