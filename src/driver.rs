//! Root-side orchestration: scatter, recursion, reduction, gather.
//!
//! The pipeline on every rank, bracketed by two group-wide barriers for
//! timing: broadcast of the element count, equal-block scatter of the
//! global array, the hypercube recursion, the prime-count reduction, a
//! gather of the final per-rank lengths (whose prefix sum the root checks
//! against N before trusting it), and the variable-length gather that
//! reassembles the sorted array in rank order.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::debug;

use crate::algo::{count_primes, hypercube_sort};
use crate::comm::{self, Group, Partition, ROOT};
use crate::error::{Error, Result};
use crate::input;

/// Outcome of a distributed run, produced on the root rank only.
#[derive(Debug)]
pub struct SortSummary {
    /// Element count.
    pub n: usize,
    /// The input file the run was fed from.
    pub source: PathBuf,
    /// Number of primes among the values.
    pub primes: i64,
    /// Wall-clock time between the bracketing barriers.
    pub elapsed: Duration,
    /// The globally sorted array.
    pub sorted: Vec<i32>,
}

impl fmt::Display for SortSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "sorted {} values from {}",
            self.n,
            self.source.display()
        )?;
        writeln!(f, "primes found: {}", self.primes)?;
        write!(f, "elapsed: {:.6} s", self.elapsed.as_secs_f64())
    }
}

/// Runs the full pipeline on one rank of `group`.
///
/// The root loads and validates `path` before anything is distributed; a
/// failure there aborts the cohort (peers observe the root's dropped
/// endpoints). Returns `Some` summary on the root and `None` on every
/// other rank.
pub fn sort_file(group: &Group, path: &Path) -> Result<Option<SortSummary>> {
    let ranks = group.size();

    let global = if group.is_root() {
        let values = input::load_input(path)?;
        if values.len() % ranks != 0 {
            return Err(Error::UnevenSplit {
                n: values.len(),
                ranks,
            });
        }
        debug!("root loaded {} values from {}", values.len(), path.display());
        Some(values)
    } else {
        None
    };

    group.barrier()?;
    let started = Instant::now();

    let n = group.broadcast(ROOT, global.as_ref().map_or(0, |g| g.len() as i32))? as usize;
    let chunk = n / ranks;
    let mut local = group.scatter(ROOT, global.as_deref(), chunk)?;
    // The root's global copy is dead weight once scattered.
    drop(global);

    hypercube_sort(&mut local, group)?;
    debug!(
        "rank {} holds {} elements after the recursion",
        group.rank(),
        local.len()
    );

    let primes = group.reduce_sum(ROOT, count_primes(&local))?;

    let counts = group.gather(ROOT, local.len() as i32)?;
    let layout = match counts {
        Some(counts) => {
            let counts: Vec<usize> = counts.iter().map(|&c| c as usize).collect();
            let layout = Partition::from_counts(&counts);
            if layout.total() != n {
                return Err(Error::CountMismatch {
                    expected: n,
                    got: layout.total(),
                });
            }
            Some(layout)
        }
        None => None,
    };
    let sorted = group.gather_varied(ROOT, &local, layout.as_ref())?;

    group.barrier()?;
    let elapsed = started.elapsed();

    match (sorted, primes) {
        (Some(sorted), Some(primes)) => Ok(Some(SortSummary {
            n,
            source: path.to_path_buf(),
            primes,
            elapsed,
            sorted,
        })),
        _ => Ok(None),
    }
}

/// Launches a cohort of `ranks` over `path` and returns the root summary.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// let summary = hypersort::driver::run(Path::new("numbers.txt"), 4).unwrap();
/// println!("{summary}");
/// ```
pub fn run(path: &Path, ranks: usize) -> Result<SortSummary> {
    let outcomes = comm::launch(ranks, |group| sort_file(&group, path))?;
    let summary = outcomes
        .into_iter()
        .flatten()
        .next()
        .expect("root rank produced no summary");
    Ok(summary)
}
