use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Distributed hypercube quicksort over an input file.
///
/// Spawns one rank per requested process, scatters the input from the
/// root, sorts, and prints the root's summary: element count, prime
/// count, and the wall-clock time between the bracketing barriers.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Input file: an element count followed by that many integers.
    input: PathBuf,

    /// Rank count; must be a power of two that divides the element count.
    #[arg(short = 'p', long, default_value_t = 4)]
    procs: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let summary = hypersort::driver::run(&opts.input, opts.procs)
        .with_context(|| format!("sorting {}", opts.input.display()))?;
    println!("{summary}");
    Ok(())
}
