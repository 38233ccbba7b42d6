use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use hypersort::generate;
use hypersort::prelude::*;
use std::hint::black_box;
use std::time::Duration;

fn distributed(values: &[i32], ranks: usize) -> Vec<i32> {
    let chunk = values.len() / ranks;
    let segments = launch(ranks, |group| {
        let rank = group.rank();
        let mut local = values[rank * chunk..(rank + 1) * chunk].to_vec();
        hypercube_sort(&mut local, &group)?;
        group.reduce_sum(ROOT, count_primes(&local))?;
        Ok(local)
    })
    .unwrap();
    segments.concat()
}

fn bench_1m_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("1M Integers");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(90)); // Prime scans dominate at this size

    let count = 1_000_000;
    let input = generate::sparse(count, Some(2)).unwrap();
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("hypercube (8 ranks)", |b| {
        b.iter_batched(
            || input.clone(),
            |data| black_box(distributed(&data, 8)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("sequential (sort_unstable + scan)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| {
                data.sort_unstable();
                black_box(count_primes(&data));
                data
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_1m_integers);
criterion_main!(benches);
