//! Input generators.
//!
//! Two strategies, matching how dense and sparse value ranges are best
//! sampled without replacement:
//! - [`dense_range`] materializes the whole range and Fisher–Yates
//!   shuffles it, then keeps the first n values. Cheap when the range is
//!   comparable to n.
//! - [`sparse`] draws from the full `i32` range and keeps a hash set of
//!   values already emitted. Cheap when the range dwarfs n, where the
//!   dense strategy would allocate gigabytes.
//!
//! Both are deterministic under a fixed seed. [`write_input`] emits the
//! file format `input::parse_input` reads back.

use std::collections::HashSet;
use std::io::Write;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// `n` unique values drawn uniformly from `[min, max)` by shuffling the
/// materialized range.
///
/// Fails if the range holds fewer than `n` values (including an inverted
/// or empty range).
///
/// # Examples
///
/// ```
/// use hypersort::generate::dense_range;
///
/// let values = dense_range(100, -50, 50, Some(7)).unwrap();
/// assert_eq!(values.len(), 100);
/// assert!(values.iter().all(|&v| (-50..50).contains(&v)));
/// ```
pub fn dense_range(n: usize, min: i32, max: i32, seed: Option<u64>) -> Result<Vec<i32>> {
    let span = (i64::from(max) - i64::from(min)).max(0) as u64;
    if (n as u64) > span {
        return Err(Error::RangeTooSmall { n, span });
    }
    let mut values: Vec<i32> = (min..max).collect();
    values.shuffle(&mut rng_from(seed));
    values.truncate(n);
    Ok(values)
}

/// `n` unique values drawn from the full `i32` range by generate-and-test
/// against a hash set of values already taken.
pub fn sparse(n: usize, seed: Option<u64>) -> Result<Vec<i32>> {
    if n > (1 << 32) {
        return Err(Error::RangeTooSmall { n, span: 1 << 32 });
    }
    let mut rng = rng_from(seed);
    let mut taken = HashSet::with_capacity(n * 2);
    let mut values = Vec::with_capacity(n);
    while values.len() < n {
        let candidate = rng.random::<i32>();
        if taken.insert(candidate) {
            values.push(candidate);
        }
    }
    Ok(values)
}

/// Writes `values` in the input file format: the count on the first line,
/// then one value per line with a trailing newline.
pub fn write_input<W: Write>(mut writer: W, values: &[i32]) -> Result<()> {
    writeln!(writer, "{}", values.len())?;
    for value in values {
        writeln!(writer, "{value}")?;
    }
    Ok(())
}
