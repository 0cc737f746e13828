use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::{ScopedService, SingletonService, TransientService};
use crate::{DiResult, Lifetime, Resolver, Scope, ScopeId};

/// Request handler holding two injected instances of every role.
///
/// Each role is resolved twice from the same resolver, standing in for two
/// constructor parameters of the same type.
pub struct SampleController {
    scope: Option<ScopeId>,
    transient: (Arc<dyn TransientService>, Arc<dyn TransientService>),
    scoped: (Arc<dyn ScopedService>, Arc<dyn ScopedService>),
    singleton: (Arc<dyn SingletonService>, Arc<dyn SingletonService>),
}

impl SampleController {
    /// Resolves the six dependencies from `resolver`.
    ///
    /// Resolving from the root provider fails with
    /// [`DiError::NoActiveScope`](crate::DiError::NoActiveScope) because of
    /// the scoped role.
    pub fn from_resolver<R>(resolver: &R) -> DiResult<Self>
    where
        R: Resolver + ?Sized,
    {
        Ok(Self {
            scope: None,
            transient: (
                resolver.get_trait::<dyn TransientService>()?,
                resolver.get_trait::<dyn TransientService>()?,
            ),
            scoped: (
                resolver.get_trait::<dyn ScopedService>()?,
                resolver.get_trait::<dyn ScopedService>()?,
            ),
            singleton: (
                resolver.get_trait::<dyn SingletonService>()?,
                resolver.get_trait::<dyn SingletonService>()?,
            ),
        })
    }

    /// Like [`from_resolver`](Self::from_resolver), remembering the scope id
    /// for the report.
    pub fn from_scope(scope: &Scope) -> DiResult<Self> {
        let mut controller = Self::from_resolver(scope)?;
        controller.scope = Some(scope.id());
        tracing::debug!(scope = %scope.id(), "sample controller constructed");
        Ok(controller)
    }

    pub fn report(&self) -> LifetimeReport {
        LifetimeReport {
            scope: self.scope,
            transient: PairReport::new(self.transient.0.current_guid(), self.transient.1.current_guid()),
            scoped: PairReport::new(self.scoped.0.current_guid(), self.scoped.1.current_guid()),
            singleton: PairReport::new(self.singleton.0.current_guid(), self.singleton.1.current_guid()),
        }
    }
}

/// The two identifiers observed for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairReport {
    pub first: Uuid,
    pub second: Uuid,
    pub same: bool,
}

impl PairReport {
    pub fn new(first: Uuid, second: Uuid) -> Self {
        Self {
            first,
            second,
            same: first == second,
        }
    }

    /// `==` or `!=`, matching the comparison.
    pub fn operator(&self) -> &'static str {
        if self.same {
            "=="
        } else {
            "!="
        }
    }
}

/// Identifiers seen by one [`SampleController`], grouped by lifetime.
///
/// `Display` renders the single-line text form:
///
/// ```text
/// Transient: [A, B] (A != B); Scoped: [C, D] (C == D); Singleton: [E, F] (E == F)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifetimeReport {
    pub scope: Option<ScopeId>,
    pub transient: PairReport,
    pub scoped: PairReport,
    pub singleton: PairReport,
}

impl LifetimeReport {
    pub fn pair(&self, lifetime: Lifetime) -> &PairReport {
        match lifetime {
            Lifetime::Transient => &self.transient,
            Lifetime::Scoped => &self.scoped,
            Lifetime::Singleton => &self.singleton,
        }
    }

    /// Pairs in display order.
    pub fn pairs(&self) -> [(Lifetime, &PairReport); 3] {
        [Lifetime::Transient, Lifetime::Scoped, Lifetime::Singleton].map(|lifetime| (lifetime, self.pair(lifetime)))
    }
}

impl fmt::Display for LifetimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (lifetime, pair)) in self.pairs().into_iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(
                f,
                "{lifetime}: [{a}, {b}] ({a} {op} {b})",
                a = pair.first,
                b = pair.second,
                op = pair.operator()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiError, LifetimeSamplesModule, ServiceCollection, ServiceCollectionExt};

    fn provider() -> crate::ServiceProvider {
        ServiceCollection::new()
            .add_module(LifetimeSamplesModule)
            .unwrap()
            .build()
    }

    #[test]
    fn report_compares_pairs() {
        let provider = provider();
        let scope = provider.create_scope();
        let report = SampleController::from_scope(&scope).unwrap().report();

        assert_eq!(report.scope, Some(scope.id()));
        assert!(!report.transient.same);
        assert!(report.scoped.same);
        assert!(report.singleton.same);
    }

    #[test]
    fn display_uses_the_actual_operator() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let report = LifetimeReport {
            scope: None,
            transient: PairReport::new(a, b),
            scoped: PairReport::new(a, a),
            singleton: PairReport::new(b, b),
        };

        assert_eq!(
            report.to_string(),
            format!("Transient: [{a}, {b}] ({a} != {b}); Scoped: [{a}, {a}] ({a} == {a}); Singleton: [{b}, {b}] ({b} == {b})")
        );
    }

    #[test]
    fn pair_selects_by_lifetime() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let report = LifetimeReport {
            scope: None,
            transient: PairReport::new(a, b),
            scoped: PairReport::new(b, b),
            singleton: PairReport::new(a, a),
        };

        assert_eq!(report.pair(Lifetime::Transient).second, b);
        assert!(!report.pair(Lifetime::Transient).same);
        assert_eq!(report.pair(Lifetime::Scoped).first, b);
        assert_eq!(report.pair(Lifetime::Singleton).first, a);

        let order: Vec<_> = report.pairs().iter().map(|(lifetime, _)| *lifetime).collect();
        assert_eq!(order, [Lifetime::Transient, Lifetime::Scoped, Lifetime::Singleton]);
    }

    #[test]
    fn root_provider_cannot_build_the_controller() {
        let err = SampleController::from_resolver(&provider()).err();
        assert!(matches!(err, Some(DiError::NoActiveScope(role)) if role.contains("ScopedService")));
    }
}
