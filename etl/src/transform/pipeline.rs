//! High-level pipeline API: build each dataset and write it.
//!
//! # Example
//!
//! ```rust,ignore
//! use pib_etl::{run_all, EtlConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = run_all(&EtlConfig::from_env())?;
//!     println!("{} industry rows, {} state rows", summary.industry_rows, summary.regional_rows);
//!     Ok(())
//! }
//! ```
//!
//! A dataset is written only after it was fully built; any error aborts
//! the run before its file is touched.

use crate::config::EtlConfig;
use crate::error::EtlResult;
use crate::logs::{log_info, log_success};
use crate::output::{write_csv, INDUSTRY_COLUMNS, REGIONAL_COLUMNS};

use super::industry::build_industries;
use super::regional::build_regional;

/// Rows written by a full run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub industry_rows: usize,
    pub regional_rows: usize,
}

/// Build and write `pib_industrias.csv`. Returns the number of rows written.
pub fn run_industries(config: &EtlConfig) -> EtlResult<usize> {
    log_info("Building GDP by industry...");
    let records = build_industries(config)?;

    let path = config.industry_output_path();
    let written = write_csv(&path, &INDUSTRY_COLUMNS, &records)?;
    log_success(format!("Wrote {} rows to {}", written, path.display()));
    Ok(written)
}

/// Build and write `pib_estatal.csv`. Returns the number of rows written.
pub fn run_regional(config: &EtlConfig) -> EtlResult<usize> {
    log_info("Building GDP by state...");
    let records = build_regional(config)?;

    let path = config.regional_output_path();
    let written = write_csv(&path, &REGIONAL_COLUMNS, &records)?;
    log_success(format!("Wrote {} rows to {}", written, path.display()));
    Ok(written)
}

/// Both conversions, industries first; stops at the first failure.
pub fn run_all(config: &EtlConfig) -> EtlResult<RunSummary> {
    let industry_rows = run_industries(config)?;
    let regional_rows = run_regional(config)?;
    Ok(RunSummary { industry_rows, regional_rows })
}
