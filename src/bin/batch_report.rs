//! Batch Crop Report
//!
//! Reads an observation table (CSV or Parquet) with Polars and prints the
//! per-plant narratives followed by the JSON report served by `/pre-defined`.
//!
//! Usage:
//!   cargo run --bin batch_report -- observations.csv

use anyhow::{Context, Result};
use crop_diagnostics::diagnostics::{compose_reports, load_observation_table, observations_from_frame};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> Result<()> {
    let path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: batch_report <observations.csv|observations.parquet>")?;

    let start = Instant::now();
    let df = load_observation_table(&path)?;
    println!("Loaded {} rows from {}", df.height(), path.display());

    let observations = observations_from_frame(&df)
        .with_context(|| format!("Invalid observation table: {}", path.display()))?;

    let batch = compose_reports(&observations)
        .with_context(|| format!("Failed to compose reports for {}", path.display()))?;

    println!("\n{}", "=".repeat(70));
    for narrative in &batch.narratives {
        println!("{}", narrative);
    }
    println!("{}", "=".repeat(70));

    println!("{}", serde_json::to_string_pretty(&batch.to_json())?);
    println!("\nCompleted {} reports in {:?}", batch.len(), start.elapsed());

    Ok(())
}
