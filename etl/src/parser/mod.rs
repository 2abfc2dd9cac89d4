//! Raw source readers.
//!
//! Turns source files into positional grids. No PIB-specific logic here:
//! the reshapers in [`crate::transform`] decide which rows and columns matter.
//!
//! - CSV files: encoding auto-detection, then the `csv` reader
//! - XLSX workbooks: see [`xlsx`]

pub mod xlsx;

use std::path::Path;

use crate::error::{SourceError, SourceResult};

pub use xlsx::{read_first_sheet, SheetGrid};

/// A single cell value, as read from any source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Cell from CSV text: numeric text becomes [`Cell::Number`].
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Numeric value; text that reads as a number counts, anything else is missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Cell::Empty => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

/// Result of parsing a CSV source
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Header line fields
    pub headers: Vec<String>,
    /// Data rows, padded to the header width
    pub rows: Vec<Vec<Cell>>,
    /// Detected encoding
    pub encoding: String,
}

/// Detect the encoding of raw bytes: valid UTF-8 wins, otherwise chardet decides.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }
    let (charset, _confidence, _language) = chardet::detect(bytes);

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string, dropping a UTF-8 byte order mark.
pub fn decode_content(id: &str, bytes: &[u8], encoding: &str) -> SourceResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec()).ok(),
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            Some(encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned())
        }
        label => encoding_rs::Encoding::for_label(label.as_bytes())
            .map(|enc| enc.decode(bytes).0.into_owned()),
    };

    let content = decoded.ok_or_else(|| SourceError::Encoding {
        id: id.to_string(),
        encoding: encoding.to_string(),
    })?;

    Ok(match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    })
}

/// Parse comma-separated text; the first line is the header.
pub fn parse_csv(id: &str, content: &str, encoding: String) -> SourceResult<ParseResult> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let csv_err = |source| SourceError::Csv { id: id.to_string(), source };

    let headers: Vec<String> = reader.headers().map_err(csv_err)?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let mut row: Vec<Cell> = record.iter().map(Cell::from_text).collect();
        if row.len() < headers.len() {
            row.resize(headers.len(), Cell::Empty);
        }
        rows.push(row);
    }

    Ok(ParseResult { headers, rows, encoding })
}

/// Parse CSV bytes with encoding auto-detection.
pub fn parse_bytes_auto(id: &str, bytes: &[u8]) -> SourceResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(id, bytes, &encoding)?;
    parse_csv(id, &content, encoding)
}

/// Read and parse a CSV source file.
pub fn parse_csv_file(id: &str, path: &Path) -> SourceResult<ParseResult> {
    if !path.is_file() {
        return Err(SourceError::NotFound {
            id: id.to_string(),
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        id: id.to_string(),
        source,
    })?;
    parse_bytes_auto(id, &bytes)
}
