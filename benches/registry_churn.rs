//! This bench test simulates a busy season: boats arriving and leaving a
//! nearly full marina, with monthly billing in between.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use marina::{
    Registry,
    domain::{CAPACITY, Rates, billing},
};

fn full_registry() -> Registry {
    let mut registry = Registry::new();
    for i in 0..CAPACITY {
        registry
            .add_record(&format!("Vessel {i:03},{},slip,{},0", i % 100, i % 85 + 1))
            .unwrap();
    }
    registry
}

fn churn(c: &mut Criterion) {
    c.bench_function("remove and re-add every boat", |b| {
        b.iter_batched(
            full_registry,
            |mut registry| {
                for i in 0..CAPACITY {
                    let boat = registry.remove(&format!("VESSEL {i:03}")).unwrap();
                    registry.insert(boat).unwrap();
                }
                registry
            },
            BatchSize::SmallInput,
        );
    });

    let rates = Rates::default();
    c.bench_function("monthly charges", |b| {
        b.iter_batched(
            full_registry,
            |mut registry| billing::apply_monthly_charges(&mut registry, &rates),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, churn);
criterion_main!(benches);
