use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hypersort::generate;

/// Generates unique integers across the full 32-bit range.
///
/// Generate-and-test against a hash set of already-taken values; suited
/// to counts far below the range size, where materializing the range for
/// a shuffle would not fit in memory.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// How many unique values to generate.
    n: usize,

    /// Output file.
    outfile: PathBuf,

    /// Seed for reproducible output; omitted means OS entropy.
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let values = generate::sparse(opts.n, opts.seed)?;
    let file = File::create(&opts.outfile)
        .with_context(|| format!("creating {}", opts.outfile.display()))?;
    let mut writer = BufWriter::new(file);
    generate::write_input(&mut writer, &values)?;
    writer.flush()?;
    println!(
        "wrote {} unique values to {}",
        opts.n,
        opts.outfile.display()
    );
    Ok(())
}
