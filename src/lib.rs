//! # Hypersort
//!
//! `hypersort` is a distributed-memory parallel sort: a hypercube-style
//! quicksort over a group of peer ranks that communicate purely by message
//! passing. The input lives on a designated root rank, gets scattered in
//! equal blocks, migrates between partner ranks as the recursion halves
//! the group around globally elected pivots, and is reassembled on the
//! root fully sorted, together with a count of the prime values found in
//! the same pass.
//!
//! ## Key Features
//!
//! - **Shared-nothing ranks**: each rank is a thread owning its buffer
//!   exclusively; every element that changes hands moves by value through
//!   a channel, never through shared memory.
//! - **Median-of-medians pivots**: the group leader elects each level's
//!   pivot from the sorted local medians of all ranks, which keeps splits
//!   balanced on skewed inputs at O(s log s) leader cost.
//! - **Deadlock-free exchange**: partner ranks swap variable-length
//!   payloads with a combined send-and-receive (count first, payload
//!   second), so no pairing order or payload size can wedge the cohort.
//! - **Variable-length reassembly**: final segment sizes are data
//!   dependent; the root gathers per-rank counts, prefix-sums the
//!   displacements, and checks the total against N before reassembling.
//!
//! ## Usage
//!
//! Sorting a distributed buffer across four ranks:
//!
//! ```rust
//! use hypersort::algo::hypercube_sort;
//! use hypersort::comm;
//!
//! let segments = comm::launch(4, |group| {
//!     // Each rank starts with its own block of the input.
//!     let mut local = match group.rank() {
//!         0 => vec![12, -4, 9],
//!         1 => vec![0, 33, -17],
//!         2 => vec![5, 5, 28],
//!         _ => vec![-1, 40, 2],
//!     };
//!     hypercube_sort(&mut local, &group)?;
//!     Ok(local)
//! })
//! .unwrap();
//!
//! let sorted: Vec<i32> = segments.concat();
//! assert_eq!(
//!     sorted,
//!     vec![-17, -4, -1, 0, 2, 5, 5, 9, 12, 28, 33, 40]
//! );
//! ```
//!
//! The full pipeline (file input, scatter, recursion, prime reduction,
//! variable-length gather, timing) lives in [`driver::run`], and the
//! `sort`, `gen-dense`, `gen-sparse`, and `gen-range` binaries wrap it and
//! the [`generate`] module for the command line.
//!
//! ## Constraints
//!
//! The rank count must be a power of two (the group halves at every
//! recursion level) and must divide the element count evenly at scatter
//! time. Both are validated up front; violations abort the whole cohort.

pub mod algo;
pub mod comm;
pub mod driver;
pub mod error;
pub mod generate;
pub mod input;

pub use algo::hypercube_sort;
pub use comm::{Group, launch};
pub use driver::{SortSummary, run};
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::algo::{count_primes, hypercube_sort, is_prime, partition_inplace};
    pub use crate::comm::{Color, Group, Partition, ROOT, Tag, launch};
    pub use crate::driver::{SortSummary, run, sort_file};
    pub use crate::error::{Error, Result};
}
