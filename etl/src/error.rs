//! Error types for the PIB conversion pipeline.
//!
//! This module defines one error type per stage:
//!
//! - [`SourceError`] - reading a source file (missing file, unreadable workbook, bad CSV)
//! - [`FormatError`] - a source whose shape does not match the expected layout
//! - [`OutputError`] - writing a result CSV
//! - [`EtlError`] - top-level orchestration errors
//!
//! Every variant carries the source identifier so a failure points at the
//! file whose format drifted. Conversion is automatic via `From`, so `?`
//! works across stage boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while reading a raw source file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file does not exist at its expected path.
    #[error("Missing source '{id}': {} not found", .path.display())]
    NotFound { id: String, path: PathBuf },

    /// The file exists but could not be read.
    #[error("Cannot read source '{id}': {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be opened or has no usable worksheet.
    #[error("Cannot read workbook '{id}': {message}")]
    Workbook { id: String, message: String },

    /// The CSV reader rejected the file.
    #[error("Invalid CSV in '{id}': {source}")]
    Csv {
        id: String,
        #[source]
        source: csv::Error,
    },

    /// The file bytes could not be decoded to text.
    #[error("Cannot decode '{id}' as {encoding}")]
    Encoding { id: String, encoding: String },
}

// =============================================================================
// Format Errors
// =============================================================================

/// A source file whose shape does not match the layout the reshapers assume.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Row or column count differs from the fixed layout.
    #[error("Format mismatch in '{id}': expected {expected} {what}, found {actual}")]
    Shape {
        id: String,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A data row has no category label.
    #[error("Format mismatch in '{id}': empty label at row {row}")]
    EmptyLabel { id: String, row: usize },

    /// Two rows (or columns) share a label, so lookups would be ambiguous.
    #[error("Format mismatch in '{id}': duplicate label '{label}'")]
    DuplicateLabel { id: String, label: String },

    /// A period header does not carry a year token.
    #[error("Format mismatch in '{id}': period header '{header}' has no year token")]
    BadPeriodKey { id: String, header: String },
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing a result CSV.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline error.
///
/// This is the error type returned by [`crate::run_all`].
#[derive(Debug, Error)]
pub enum EtlError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Output(#[from] OutputError),

    /// A key missing from a static reference table.
    #[error("Unknown key '{key}' in {id}")]
    KeyMismatch { id: String, key: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source reading.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for shape checks.
pub type FormatResult<T> = Result<T, FormatError>;

/// Result type for output writing.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for pipeline operations.
pub type EtlResult<T> = Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let err = SourceError::NotFound {
            id: "PIBT_2".into(),
            path: PathBuf::from("source_industrias/PIBT_2.xlsx"),
        };
        let etl: EtlError = err.into();
        let msg = etl.to_string();
        assert!(msg.contains("PIBT_2"));
        assert!(msg.contains("not found"));

        let err = FormatError::Shape {
            id: "nac".into(),
            what: "rows",
            expected: 264,
            actual: 263,
        };
        let etl: EtlError = err.into();
        assert!(matches!(etl, EtlError::Format(_)));
    }

    #[test]
    fn test_shape_error_reports_expected_and_actual() {
        let err = FormatError::Shape {
            id: "PIBT_3".into(),
            what: "period columns",
            expected: 231,
            actual: 238,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 231 period columns"));
        assert!(msg.contains("found 238"));
    }
}
