use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use filing_data::BracketCsvLoader;

/// Validate a bracket-schedule CSV before it ships.
///
/// The CSV file should have the following columns:
/// - tax_year: The tax year the bracket belongs to (e.g., 2024)
/// - lower_bound: Where the bracket starts
/// - upper_bound: Where it ends (empty for the unbounded top bracket)
/// - rate: The marginal rate as a decimal (e.g., 0.10)
#[derive(Parser, Debug)]
#[command(name = "filing-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket schedules
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking bracket schedules from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = BracketCsvLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let tables = BracketCsvLoader::build_tables(&records)
        .context("Bracket schedules failed validation")?;

    for table in &tables {
        if let Some(top) = table.brackets().last() {
            println!(
                "  {}: {} brackets, top rate {}",
                table.tax_year(),
                table.brackets().len(),
                top.label()
            );
        }
    }

    println!("All {} schedules valid.", tables.len());

    Ok(())
}
