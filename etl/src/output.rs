//! CSV output.
//!
//! Records are serialized to `<name>.tmp` next to the target and renamed over
//! it once the whole table is on disk, so an interrupted run leaves the
//! previous output in place.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, OutputResult};

/// Column headers of `pib_industrias.csv`.
pub const INDUSTRY_COLUMNS: [&str; 5] = [
    "PERIODO",
    "CLAVE_INDUSTRIA",
    "INDUSTRIA",
    "VALOR_CONSTANTE",
    "VALOR_CORRIENTE",
];

/// Column headers of `pib_estatal.csv`.
pub const REGIONAL_COLUMNS: [&str; 7] = [
    "PERIODO",
    "CVE_ENT",
    "ENTIDAD",
    "CLAVE_INDUSTRIA",
    "INDUSTRIA",
    "VALOR_CONSTANTE",
    "VALOR_CORRIENTE",
];

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_to<T: Serialize>(path: &Path, headers: &[&str], records: &[T]) -> OutputResult<()> {
    let csv_err = |source| OutputError::Csv { path: path.to_path_buf(), source };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(headers).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| OutputError::Io { path: path.to_path_buf(), source })
}

/// Write `records` as UTF-8 CSV with an explicit header row, replacing `path`.
///
/// The header is written even when there are no records. Returns the number
/// of data rows written.
pub fn write_csv<T: Serialize>(path: &Path, headers: &[&str], records: &[T]) -> OutputResult<usize> {
    let io_err = |source| OutputError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = temp_path(path);
    if let Err(e) = write_to(&tmp, headers, records) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(records.len())
}
