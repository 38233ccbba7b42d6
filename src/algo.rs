//! The hypercube quicksort recursion and its local primitives.
//!
//! One recursion level on a group of size s: sort locally, elect a
//! group-wide pivot by median-of-medians, partition in place, swap the
//! off-color region with the partner rank across the group midpoint, then
//! split the group in half by color and recurse into the matching half.
//! After log2(s) levels every group is a singleton and a final local sort
//! leaves the concatenation of the rank buffers globally ordered.
//!
//! The main entry point is [`hypercube_sort`]; [`is_prime`] and
//! [`partition_inplace`] are the local primitives the driver and the tests
//! also use on their own.

use log::trace;

use crate::comm::{Color, Group, ROOT, Tag};
use crate::error::{Error, Result};

/// Primality by trial division.
///
/// Rejects n ≤ 1, checks divisibility by 2 and 3, then walks the 6k±1
/// candidates up to √n. The square is taken in 64-bit so it cannot wrap
/// for any `i32` input.
///
/// # Examples
///
/// ```
/// use hypersort::algo::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(2_147_483_647));
/// assert!(!is_prime(-7));
/// assert!(!is_prime(49));
/// ```
pub fn is_prime(n: i32) -> bool {
    if n <= 1 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let n = i64::from(n);
    let mut k = 5_i64;
    while k * k <= n {
        if n % k == 0 || n % (k + 2) == 0 {
            return false;
        }
        k += 6;
    }
    true
}

/// Number of primes in `values`.
pub fn count_primes(values: &[i32]) -> i32 {
    values.iter().filter(|&&v| is_prime(v)).count() as i32
}

/// Two-pointer in-place partition around `pivot`.
///
/// Rearranges `buf` so everything ≤ `pivot` precedes everything > `pivot`
/// and returns the first index of the greater region (0 for an empty
/// buffer). Preserves the multiset; makes no stability promise.
///
/// # Examples
///
/// ```
/// use hypersort::algo::partition_inplace;
///
/// let mut buf = vec![5, 9, 1, 7, 3];
/// let split = partition_inplace(&mut buf, 5);
///
/// assert_eq!(split, 3);
/// assert!(buf[..split].iter().all(|&v| v <= 5));
/// assert!(buf[split..].iter().all(|&v| v > 5));
/// ```
pub fn partition_inplace(buf: &mut [i32], pivot: i32) -> usize {
    let mut i = 0;
    let mut j = buf.len();
    while i < j {
        if buf[i] <= pivot {
            i += 1;
        } else if buf[j - 1] > pivot {
            j -= 1;
        } else {
            buf.swap(i, j - 1);
            i += 1;
            j -= 1;
        }
    }
    i
}

/// Median-of-medians pivot election across the group.
///
/// Each rank contributes its local median (0 when its buffer is empty;
/// such ranks trivially satisfy the partition invariant on either side);
/// the group leader sorts the medians, picks the middle one, and
/// broadcasts it.
fn elect_pivot(local: &[i32], group: &Group) -> Result<i32> {
    let median = if local.is_empty() {
        0
    } else {
        local[local.len() / 2]
    };
    let pivot = match group.gather(ROOT, median)? {
        Some(mut medians) => {
            medians.sort_unstable();
            medians[medians.len() / 2]
        }
        None => 0,
    };
    group.broadcast(ROOT, pivot)
}

/// Recursive hypercube quicksort over the ranks of `group`.
///
/// Every rank of the group must call this with its own buffer. On return
/// the buffer is sorted locally and the buffers of the group, concatenated
/// in rank order, are sorted globally. Buffer sizes change as elements
/// migrate between partners; the length on return is authoritative.
///
/// # Examples
///
/// ```
/// use hypersort::algo::hypercube_sort;
/// use hypersort::comm;
///
/// let segments = comm::launch(2, |group| {
///     let mut local = if group.rank() == 0 {
///         vec![9, 1, 7]
///     } else {
///         vec![4, 8, 2]
///     };
///     hypercube_sort(&mut local, &group)?;
///     Ok(local)
/// })
/// .unwrap();
///
/// assert_eq!(segments.concat(), vec![1, 2, 4, 7, 8, 9]);
/// ```
pub fn hypercube_sort(local: &mut Vec<i32>, group: &Group) -> Result<()> {
    let size = group.size();
    if size < 2 {
        local.sort_unstable();
        return Ok(());
    }

    local.sort_unstable();
    let pivot = elect_pivot(local, group)?;
    let split = partition_inplace(local, pivot);

    let rank = group.rank();
    let half = size / 2;
    let color = Color::of(rank, size);
    let (partner, keep, send) = match color {
        Color::Low => (rank + half, 0..split, split..local.len()),
        Color::High => (rank - half, split..local.len(), 0..split),
    };
    trace!(
        "rank {rank}/{size} pivot {pivot}: keeping {} elements, sending {} to rank {partner}",
        keep.len(),
        send.len(),
    );

    // Length phase, then payload phase; both combined send-and-receives.
    let announced = group.send_receive(partner, Tag::Len, &[send.len() as i32])?;
    let &[expected] = announced.as_slice() else {
        return Err(Error::LengthMismatch {
            peer: partner,
            announced: 1,
            got: announced.len(),
        });
    };
    let incoming = group.send_receive(partner, Tag::Data, &local[send])?;
    if incoming.len() != expected as usize {
        return Err(Error::LengthMismatch {
            peer: partner,
            announced: expected as usize,
            got: incoming.len(),
        });
    }

    // Kept region first, partner's payload after it; the old buffer is
    // replaced wholesale so no stale slice survives the reallocation.
    let mut merged = Vec::with_capacity(keep.len() + incoming.len());
    merged.extend_from_slice(&local[keep]);
    merged.extend_from_slice(&incoming);
    *local = merged;

    let sub = group.split(color);
    hypercube_sort(local, &sub)
}
