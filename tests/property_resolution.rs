//! Property-based tests for lifetime semantics.

use proptest::prelude::*;
use scoped_lifetimes::{DiError, Lifetime, Resolver, ServiceCollection};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Probe(usize);

fn lifetime() -> impl Strategy<Value = Lifetime> {
    prop_oneof![
        Just(Lifetime::Transient),
        Just(Lifetime::Scoped),
        Just(Lifetime::Singleton),
    ]
}

proptest! {
    /// Within one scope: transient never repeats, scoped and singleton always do.
    #[test]
    fn same_scope_identity_follows_lifetime(lifetime in lifetime(), resolutions in 2usize..12) {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let mut services = ServiceCollection::new();
        services.register(lifetime, move || Probe(c.fetch_add(1, Ordering::SeqCst)));

        let provider = services.build();
        let scope = provider.create_scope();
        let ids: Vec<usize> = (0..resolutions).map(|_| scope.get_required::<Probe>().0).collect();

        match lifetime {
            Lifetime::Transient => {
                prop_assert_eq!(calls.load(Ordering::SeqCst), resolutions);
                prop_assert!(ids.windows(2).all(|w| w[0] != w[1]));
            }
            Lifetime::Scoped | Lifetime::Singleton => {
                prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
                prop_assert!(ids.iter().all(|&id| id == ids[0]));
            }
        }
    }

    /// Across scopes: only singletons are shared.
    #[test]
    fn cross_scope_identity_follows_lifetime(lifetime in lifetime(), scopes in 2usize..8) {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let mut services = ServiceCollection::new();
        services.register(lifetime, move || Probe(c.fetch_add(1, Ordering::SeqCst)));

        let provider = services.build();
        let firsts: Vec<usize> = (0..scopes)
            .map(|_| provider.with_scope(|s| s.get_required::<Probe>().0))
            .collect();

        let shared = firsts.iter().all(|&id| id == firsts[0]);
        prop_assert_eq!(shared, lifetime == Lifetime::Singleton);
    }

    /// Resolving from the root works for everything except scoped roles.
    #[test]
    fn root_resolution_depends_on_lifetime(lifetime in lifetime()) {
        let mut services = ServiceCollection::new();
        services.register(lifetime, || Probe(0));
        let provider = services.build();

        let result = provider.get::<Probe>();
        if lifetime == Lifetime::Scoped {
            prop_assert!(matches!(result, Err(DiError::NoActiveScope(_))));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// The last of any sequence of registrations decides the lifetime.
    #[test]
    fn last_registration_decides(lifetimes in prop::collection::vec(lifetime(), 1..6)) {
        let mut services = ServiceCollection::new();
        for (i, lifetime) in lifetimes.iter().enumerate() {
            services.register(*lifetime, move || Probe(i));
        }

        let descriptors = services.get_service_descriptors();
        prop_assert_eq!(descriptors.len(), 1);
        prop_assert_eq!(descriptors[0].lifetime, *lifetimes.last().unwrap());
        prop_assert_eq!(services.replaced_count(), lifetimes.len() - 1);

        let provider = services.build();
        let scope = provider.create_scope();
        prop_assert_eq!(scope.get_required::<Probe>().0, lifetimes.len() - 1);
    }

    #[test]
    fn unregistered_role_is_always_an_error(register in any::<bool>()) {
        let mut services = ServiceCollection::new();
        if register {
            services.register(Lifetime::Singleton, || 1u8);
        }
        let provider = services.build();
        let scope = provider.create_scope();

        prop_assert!(matches!(scope.get::<Probe>(), Err(DiError::UnregisteredRole(_))));
        prop_assert_eq!(scope.get::<u8>().is_ok(), register);
    }
}
