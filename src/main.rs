use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::analyzer::compute;
use crate::csv_reader::read_data;
use crate::dataset::Dataset;

mod analyzer;
mod csv_reader;
mod dataset;
mod error;

const CSV_FILE_PATH: &'static str = "data/adult.data.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CSV_FILE_PATH));

    let records = read_data(&path)
        .with_context(|| format!("reading census data from {}", path.display()))?;
    info!(rows = records.len(), "loaded census dataset");

    let dataset = Dataset::new(records);
    let report = compute(&dataset, true).context("computing demographic report")?;
    info!(
        highest_earning_country = %report.highest_earning_country,
        "analysis complete"
    );
    Ok(())
}
