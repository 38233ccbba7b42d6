use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hypersort::generate;

/// Generates unique integers by shuffling a dense range.
#[derive(Debug, Parser)]
#[command(version, about, allow_negative_numbers = true)]
struct Opts {
    /// How many unique values to generate.
    n: usize,

    /// Output file.
    outfile: PathBuf,

    /// Lower bound (inclusive).
    #[arg(default_value_t = 0)]
    min: i32,

    /// Upper bound (exclusive); the range must hold at least N values.
    #[arg(default_value_t = 1_000_000)]
    max: i32,

    /// Seed for reproducible output; omitted means OS entropy.
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let values = generate::dense_range(opts.n, opts.min, opts.max, opts.seed)?;
    let file = File::create(&opts.outfile)
        .with_context(|| format!("creating {}", opts.outfile.display()))?;
    let mut writer = BufWriter::new(file);
    generate::write_input(&mut writer, &values)?;
    writer.flush()?;
    println!(
        "wrote {} unique values in [{}, {}) to {}",
        opts.n,
        opts.min,
        opts.max,
        opts.outfile.display()
    );
    Ok(())
}
