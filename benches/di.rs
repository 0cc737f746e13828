use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scoped_lifetimes::*;

fn bench_lifetimes(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for lifetime in Lifetime::ALL {
        let mut sc = ServiceCollection::new();
        sc.register(lifetime, || [0u8; 64]);
        let sp = sc.build();
        let scope = sp.create_scope();
        // Prime the cached lifetimes
        let _ = scope.get::<[u8; 64]>().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(lifetime.as_str()), &scope, |b, scope| {
            b.iter(|| black_box(scope.get::<[u8; 64]>().unwrap()))
        });
    }

    group.finish();
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let mut sc = ServiceCollection::new();
                sc.add_singleton_factory::<ExpensiveToCreate, _>(|_| ExpensiveToCreate {
                    data: (0..1000).collect(),
                });
                sc.build()
            },
            |sp| black_box(sp.get::<ExpensiveToCreate>().unwrap().data.len()),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_sample_request(c: &mut Criterion) {
    let sp = ServiceCollection::new()
        .add_module(LifetimeSamplesModule)
        .unwrap()
        .build();

    c.bench_function("sample_controller_per_scope", |b| {
        b.iter(|| {
            let report = sp.with_scope(|scope| SampleController::from_scope(scope).unwrap().report());
            black_box(report)
        })
    });

    c.bench_function("trait_scoped_hit", |b| {
        let scope = sp.create_scope();
        b.iter(|| black_box(scope.get_trait::<dyn ScopedService>().unwrap()))
    });
}

criterion_group!(benches, bench_lifetimes, bench_singleton_cold, bench_sample_request);
criterion_main!(benches);
