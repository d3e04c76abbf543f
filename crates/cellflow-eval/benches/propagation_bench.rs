use cellflow_eval::{PropagationStrategy, Reactor, ReactorConfig};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn reactor(strategy: PropagationStrategy, cells: usize) -> Reactor<'static, i64> {
    Reactor::with_config(
        ReactorConfig::default()
            .with_strategy(strategy)
            .with_cell_capacity(cells),
    )
}

fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Propagation");

    let sizes = [100, 1000, 5000];
    let strategies = [
        ("Ordered", PropagationStrategy::Ordered),
        ("Relaxation", PropagationStrategy::Relaxation),
    ];

    for n in sizes.iter() {
        for (name, strategy) in strategies {
            // --- 1. DEEP CHAIN ---
            // Every cell reads the previous one; one update walks the whole chain.
            group.bench_with_input(BenchmarkId::new(format!("Chain/{name}"), n), n, |b, &n| {
                let mut r = reactor(strategy, n);
                let input = r.create_input(0);
                let mut prev = r.create_compute1(input, |v| v + 1).unwrap();
                for _ in 1..n {
                    prev = r.create_compute1(prev, |v| v + 1).unwrap();
                }
                let mut next = 0;
                b.iter(|| {
                    next += 1;
                    r.set_value(input, black_box(next)).unwrap()
                });
            });

            // --- 2. WIDE FAN-OUT ---
            // One input feeding n independent cells joined pairwise.
            group.bench_with_input(BenchmarkId::new(format!("FanOut/{name}"), n), n, |b, &n| {
                let mut r = reactor(strategy, n);
                let input = r.create_input(0);
                let leaves: Vec<_> = (0..n)
                    .map(|i| r.create_compute1(input, move |v| v * i as i64).unwrap())
                    .collect();
                for pair in leaves.chunks(2) {
                    if let [x, y] = pair {
                        r.create_compute2(*x, *y, |a, b| a + b).unwrap();
                    }
                }
                let mut next = 0;
                b.iter(|| {
                    next += 1;
                    r.set_value(input, black_box(next)).unwrap()
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_propagation);
criterion_main!(benches);
