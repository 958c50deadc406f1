use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use any2csv::{read_rows, write_csv};

/// Convert a JSON, CSV or TSV file into a normalized CSV file.
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert JSON/CSV/TSV to CSV", long_about = None)]
struct Cli {
    /// Input file; `.json` is parsed as JSON, anything else as delimited text
    input: PathBuf,
    /// Output CSV path
    output: PathBuf,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let cli = Cli::parse();

    let rows = read_rows(&cli.input)?;
    info!(rows = rows.len(), "input loaded");

    write_csv(&rows, &cli.output)?;

    println!(
        "Conversion from {} to {} successfully completed.",
        cli.input.display(),
        cli.output.display()
    );
    Ok(())
}
