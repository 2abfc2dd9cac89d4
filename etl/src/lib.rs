//! # pib-etl - INEGI quarterly GDP tabulations to tidy CSV
//!
//! Converts the published GDP spreadsheets into two long-format datasets:
//! `pib_industrias.csv` (national GDP by industry, quarterly) and
//! `pib_estatal.csv` (GDP by state and activity).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ XLSX / CSV   │────▶│   Parser    │────▶│  Transform   │────▶│  Tidy CSV   │
//! │ (fixed paths)│     │ (grid/cells)│     │ (reshape +   │     │ (overwrite) │
//! └──────────────┘     └─────────────┘     │  relabel)    │     └─────────────┘
//!                                          └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`config`] - Source layouts and runtime configuration
//! - [`models`] - Periods, regions and output records
//! - [`periods`] - Positional quarter labels for the industry workbooks
//! - [`relabel`] - Category code/name splitting and override tables
//! - [`parser`] - CSV and XLSX readers
//! - [`transform`] - Reshaping and the pipeline entry points
//! - [`output`] - CSV writer
//! - [`logs`] - Progress logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Reshaping
pub mod periods;
pub mod relabel;
pub mod transform;

// Output
pub mod output;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{EtlConfig, IndustryLayout, RegionalLayout, YearRange};

pub use error::{EtlError, EtlResult, FormatError, OutputError, SourceError};

pub use models::{region_key, IndustryRecord, Period, Region, RegionalRecord, REGIONS};

pub use periods::{assign_periods, period_slots, PeriodSlot};

pub use relabel::{split_category, CategoryKey};

pub use transform::pipeline::{run_all, run_industries, run_regional, RunSummary};
