use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use clap::Parser;
use splaymetrics::{
    driver,
    prelude::{DoubleRotation, Naive, Result},
};

/// Runs a batch-instruction workload once per splay policy, writing one
/// report file per policy next to the input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Instruction file to process.
    #[arg(default_value = "data.txt")]
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    run_policy(&args.input, "double", |reader, writer| {
        driver::process::<i64, DoubleRotation, _, _>(reader, writer)
    })?;
    run_policy(&args.input, "naive", |reader, writer| {
        driver::process::<i64, Naive, _, _>(reader, writer)
    })?;
    Ok(())
}

fn run_policy(
    input: &Path,
    prefix: &str,
    process: impl FnOnce(File, BufWriter<File>) -> Result<()>,
) -> Result<()> {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("data");
    let output = input.with_file_name(format!("{prefix}-{stem}.out"));

    let reader = File::open(input)?;
    let writer = BufWriter::new(File::create(&output)?);
    process(reader, writer)
}
