//! Error types for the dependency injection container.

use thiserror::Error;

/// Dependency injection errors
///
/// Every variant names the role (type or trait name) that failed so a caller
/// can report it without holding on to the key.
///
/// # Examples
///
/// ```rust
/// use scoped_lifetimes::{DiError, ServiceCollection, Resolver};
///
/// let provider = ServiceCollection::new().build();
/// match provider.get::<String>() {
///     Err(DiError::UnregisteredRole(role)) => {
///         assert_eq!(role, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// Role has no registration
    #[error("Service not registered: {0}")]
    UnregisteredRole(&'static str),
    /// Scoped role resolved from the root provider
    #[error("No active scope to resolve scoped service: {0}")]
    NoActiveScope(&'static str),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<&'static str>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Options failed validation when first built
    #[error("Options<{options}> validation failed: {reason}")]
    InvalidOptions {
        options: &'static str,
        reason: String,
    },
}

impl DiError {
    /// Stable, machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DiError::UnregisteredRole(_) => "UnregisteredRole",
            DiError::NoActiveScope(_) => "NoActiveScope",
            DiError::TypeMismatch(_) => "TypeMismatch",
            DiError::Circular(_) => "Circular",
            DiError::DepthExceeded(_) => "DepthExceeded",
            DiError::InvalidOptions { .. } => "InvalidOptions",
        }
    }

    /// The role the error is about, when there is a single one.
    pub fn role(&self) -> Option<&'static str> {
        match self {
            DiError::UnregisteredRole(role)
            | DiError::NoActiveScope(role)
            | DiError::TypeMismatch(role) => Some(role),
            DiError::Circular(path) => path.last().copied(),
            DiError::InvalidOptions { options, .. } => Some(options),
            DiError::DepthExceeded(_) => None,
        }
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
