//! Service key types for the dependency injection container.

use std::any::TypeId;
use std::fmt;

/// Key for service storage and lookup.
///
/// A key is the container's notion of a *role*: the thing a caller asks for.
///
/// - **Type**: a concrete type (`String`, `Database`, `Options<T>`)
/// - **Trait**: a trait object (`dyn ScopedService`)
///
/// # Examples
///
/// ```rust
/// use scoped_lifetimes::{key_of_trait, key_of_type, Key};
/// use std::any::TypeId;
///
/// trait Logger: Send + Sync {}
///
/// let ty = key_of_type::<u32>();
/// assert_eq!(ty, Key::Type(TypeId::of::<u32>(), "u32"));
/// assert_eq!(ty.display_name(), "u32");
///
/// let tr = key_of_trait::<dyn Logger>();
/// assert!(tr.is_trait());
/// assert!(tr.display_name().contains("Logger"));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Key {
    /// Concrete type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Trait binding key
    ///
    /// Trait objects are unsized and registered behind `Arc<dyn Trait>`, so
    /// the trait's type name is the identity.
    Trait(&'static str),
}

impl Key {
    /// Get the type or trait name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::Trait(name) => name,
        }
    }

    /// Whether the key names a trait object role.
    pub fn is_trait(&self) -> bool {
        matches!(self, Key::Trait(_))
    }
}

// TypeId-only comparison for concrete types
impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Trait(a), Key::Trait(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::Trait(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[inline(always)]
pub fn key_of_type<T: 'static>() -> Key {
    Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}

#[inline(always)]
pub fn key_of_trait<T: ?Sized + 'static>() -> Key {
    Key::Trait(std::any::type_name::<T>())
}
