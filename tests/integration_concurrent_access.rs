//! Thread-safety of the three lifetimes under concurrent resolution.

use scoped_lifetimes::{
    LifetimeSamplesModule, Resolver, SampleController, ServiceCollection, ServiceCollectionExt, SingletonService,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

struct Expensive {
    id: usize,
}

#[test]
fn concurrent_first_singleton_resolution_runs_producer_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();

    let mut sc = ServiceCollection::new();
    sc.add_singleton_factory::<Expensive, _>(move |_| {
        // Widen the race window.
        thread::sleep(Duration::from_millis(20));
        Expensive {
            id: c.fetch_add(1, Ordering::SeqCst),
        }
    });
    let sp = sc.build();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let sp = sp.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                sp.get_required::<Expensive>()
            })
        })
        .collect();

    let instances: Vec<Arc<Expensive>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(instances.iter().all(|i| Arc::ptr_eq(i, &instances[0])));
    assert_eq!(instances[0].id, 0);
}

#[test]
fn concurrent_scoped_resolution_on_one_scope_yields_one_instance() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();

    let mut sc = ServiceCollection::new();
    sc.add_scoped_factory::<Expensive, _>(move |_| {
        thread::sleep(Duration::from_millis(10));
        Expensive {
            id: c.fetch_add(1, Ordering::SeqCst),
        }
    });
    let sp = sc.build();
    let scope = Arc::new(sp.create_scope());

    let barrier = Arc::new(Barrier::new(THREADS));
    let ids: HashSet<usize> = (0..THREADS)
        .map(|_| {
            let scope = scope.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                scope.get_required::<Expensive>().id
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    assert_eq!(ids.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn scopes_on_different_threads_are_isolated() {
    let sp = ServiceCollection::new()
        .add_module(LifetimeSamplesModule)
        .unwrap()
        .build();

    let reports: Vec<_> = (0..THREADS)
        .map(|_| {
            let sp = sp.clone();
            thread::spawn(move || sp.with_scope(|scope| SampleController::from_scope(scope).unwrap().report()))
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    let scoped: HashSet<_> = reports.iter().map(|r| r.scoped.first).collect();
    let singletons: HashSet<_> = reports.iter().map(|r| r.singleton.first).collect();
    assert_eq!(scoped.len(), THREADS);
    assert_eq!(singletons.len(), 1);
    assert!(reports.iter().all(|r| r.scoped.same && r.singleton.same && !r.transient.same));

    let root_singleton = sp.get_required_trait::<dyn SingletonService>().current_guid();
    assert!(singletons.contains(&root_singleton));
}

#[test]
fn concurrent_singleton_trait_resolution_yields_one_identifier() {
    let sp = ServiceCollection::new()
        .add_module(LifetimeSamplesModule)
        .unwrap()
        .build();

    let barrier = Arc::new(Barrier::new(THREADS));
    let guids: HashSet<_> = (0..THREADS)
        .map(|i| {
            let sp = sp.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                if i % 2 == 0 {
                    sp.get_required_trait::<dyn SingletonService>().current_guid()
                } else {
                    sp.with_scope(|scope| scope.get_required_trait::<dyn SingletonService>().current_guid())
                }
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    assert_eq!(guids.len(), 1);
}
