use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use shiptrack_catalog::PricingRule;
use shiptrack_pricing::charge;
use shiptrack_tracking::ParcelFlags;

fn standard_rule() -> PricingRule {
    PricingRule {
        base_price: 50.0,
        price_per_km: 2.0,
        price_per_kg: 10.0,
        price_per_cubic_meter: 100.0,
        dangerous_surcharge: 30.0,
        fragile_surcharge: 20.0,
        oversize_surcharge: 40.0,
    }
}

fn bench_charge(c: &mut Criterion) {
    let rule = standard_rule();
    let flags = ParcelFlags {
        dangerous_goods: true,
        fragile: true,
        international: false,
    };

    let mut group = c.benchmark_group("pricing");
    for batch in [1_000u64, 10_000, 100_000] {
        group.throughput(Throughput::Elements(batch));
        group.bench_with_input(BenchmarkId::new("charge", batch), &batch, |b, &batch| {
            b.iter(|| {
                let mut total = 0.0;
                for i in 0..batch {
                    let distance = (i % 250) as f64;
                    total += charge(
                        black_box(&rule),
                        black_box(2.0),
                        black_box(0.012),
                        black_box([120.0, 10.0, 10.0]),
                        black_box(flags),
                        black_box(distance),
                    );
                }
                total
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_charge);
criterion_main!(benches);
