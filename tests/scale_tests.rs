use hypersort::generate;
use hypersort::prelude::*;
use std::time::Instant;

fn distributed_sort(values: &[i32], ranks: usize) -> Vec<i32> {
    let chunk = values.len() / ranks;
    let segments = launch(ranks, |group| {
        let rank = group.rank();
        let mut local = values[rank * chunk..(rank + 1) * chunk].to_vec();
        hypercube_sort(&mut local, &group)?;
        Ok(local)
    })
    .unwrap();
    segments.concat()
}

#[test]
fn test_sort_64k_across_8_ranks() {
    let count = 1 << 16;
    println!("Generating {count} unique elements...");
    let values = generate::sparse(count, Some(0xC0FFEE)).unwrap();

    println!("Sorting {count} elements across 8 ranks...");
    let start = Instant::now();
    let sorted = distributed_sort(&values, 8);
    let duration = start.elapsed();
    println!("Sorted {count} elements in {duration:?}");

    assert_eq!(sorted.len(), count);
    let mut expected = values.clone();
    expected.sort_unstable();
    assert_eq!(sorted, expected);
}

#[test]
#[ignore]
fn test_sort_16m_across_16_ranks() {
    // WARNING: Allocates several hundred MB and wants 16 hardware
    // threads to show a speedup; correctness holds regardless.
    let count = 1 << 24;
    println!("Generating {count} unique elements...");
    let values = generate::sparse(count, Some(0xFEED)).unwrap();

    println!("Sorting {count} elements across 16 ranks...");
    let start = Instant::now();
    let sorted = distributed_sort(&values, 16);
    let duration = start.elapsed();
    println!("Sorted {count} elements in {duration:?}");

    assert_eq!(sorted.len(), count);

    // Spot-check ordering to keep the verification cheap.
    for window in sorted.windows(2).step_by(1_000) {
        assert!(window[0] <= window[1]);
    }
}
