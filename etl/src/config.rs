//! Source-format constants and runtime configuration.
//!
//! The fixed offsets below describe the current INEGI publication layout.
//! When a new vintage moves rows or adds years, update the constants here
//! (and the layout `version` tag); the loaders check every shape against
//! them before slicing.

use std::ops::Range;
use std::path::{Path, PathBuf};

/// First year covered by the quarterly industry tabulations.
pub const FIRST_YEAR: i32 = 1993;

/// Last year covered by the quarterly industry tabulations.
pub const LAST_YEAR: i32 = 2025;

/// Columns per year in the industry tabulations: Q1..Q4, then 6, 9 and 12 month totals.
pub const SLOTS_PER_YEAR: usize = 7;

/// Real quarters among the [`SLOTS_PER_YEAR`] columns.
pub const QUARTERS_PER_YEAR: usize = 4;

/// Industry figures are published as annualized rates.
pub const ANNUALIZATION_DIVISOR: f64 = 4.0;

/// Constant-price quarterly industry series.
pub const CONSTANT_DATASET: &str = "PIBT_2";

/// Current-price quarterly industry series.
pub const CURRENT_DATASET: &str = "PIBT_3";

/// Vintage token embedded in the regional file names.
pub const DEFAULT_REGIONAL_VINTAGE: &str = "2023";

pub const INDUSTRY_OUTPUT_FILE: &str = "pib_industrias.csv";
pub const REGIONAL_OUTPUT_FILE: &str = "pib_estatal.csv";

const DEFAULT_INDUSTRY_DIR: &str = "./source_industrias";
const DEFAULT_REGIONAL_DIR: &str = "./source_estatal";
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Inclusive range of years covered by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub const fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// Number of years in the range (0 when `last < first`).
    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first..=self.last
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(FIRST_YEAR, LAST_YEAR)
    }
}

/// Where the figures live inside an industry workbook.
///
/// Coordinates are absolute sheet positions (A1 is row 0, column 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryLayout {
    pub version: &'static str,
    /// Column holding the `"<code> - <name>"` labels.
    pub label_column: usize,
    /// Rows holding levels; the percentage-change block below is excluded.
    pub data_rows: Range<usize>,
}

impl Default for IndustryLayout {
    fn default() -> Self {
        Self {
            version: "pibt-2018b",
            label_column: 0,
            data_rows: 7..191,
        }
    }
}

/// Where the two price bases live inside a regional CSV.
///
/// Row positions count data rows only (the header line is excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionalLayout {
    pub version: &'static str,
    pub row_count: usize,
    pub constant_rows: Range<usize>,
    pub current_rows: Range<usize>,
    /// Leading characters of a period header that form its key.
    pub period_key_width: usize,
}

impl Default for RegionalLayout {
    fn default() -> Self {
        Self {
            version: "pibe-2018-r2023",
            row_count: 264,
            constant_rows: 0..44,
            current_rows: 220..264,
            period_key_width: 4,
        }
    }
}

/// Runtime configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub industry_dir: PathBuf,
    pub regional_dir: PathBuf,
    pub output_dir: PathBuf,
    pub regional_vintage: String,
    pub years: YearRange,
    pub industry_layout: IndustryLayout,
    pub regional_layout: RegionalLayout,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            industry_dir: PathBuf::from(DEFAULT_INDUSTRY_DIR),
            regional_dir: PathBuf::from(DEFAULT_REGIONAL_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            regional_vintage: DEFAULT_REGIONAL_VINTAGE.to_string(),
            years: YearRange::default(),
            industry_layout: IndustryLayout::default(),
            regional_layout: RegionalLayout::default(),
        }
    }
}

impl EtlConfig {
    /// Defaults overridden by `PIB_INDUSTRY_DIR`, `PIB_REGIONAL_DIR`,
    /// `PIB_OUTPUT_DIR` and `PIB_REGIONAL_VINTAGE` when set.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`EtlConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = set("PIB_INDUSTRY_DIR") {
            config.industry_dir = PathBuf::from(dir);
        }
        if let Some(dir) = set("PIB_REGIONAL_DIR") {
            config.regional_dir = PathBuf::from(dir);
        }
        if let Some(dir) = set("PIB_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(vintage) = set("PIB_REGIONAL_VINTAGE") {
            config.regional_vintage = vintage.trim().to_string();
        }
        config
    }

    /// Path of an industry workbook, e.g. `source_industrias/PIBT_2.xlsx`.
    pub fn industry_source_path(&self, dataset: &str) -> PathBuf {
        self.industry_dir.join(format!("{dataset}.xlsx"))
    }

    /// Path of a regional CSV, keyed by the region's file abbreviation.
    pub fn regional_source_path(&self, abbreviation: &str) -> PathBuf {
        self.regional_dir.join(format!(
            "conjunto_de_datos_pibe_entidad_{}{}_r.csv",
            abbreviation, self.regional_vintage
        ))
    }

    pub fn industry_output_path(&self) -> PathBuf {
        self.output_dir.join(INDUSTRY_OUTPUT_FILE)
    }

    pub fn regional_output_path(&self) -> PathBuf {
        self.output_dir.join(REGIONAL_OUTPUT_FILE)
    }

    /// Point every directory at `root` (sources in the usual sub-directories).
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            industry_dir: root.join("source_industrias"),
            regional_dir: root.join("source_estatal"),
            output_dir: root.to_path_buf(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_year_range() {
        let years = YearRange::default();
        assert_eq!(years.first, 1993);
        assert_eq!(years.last, 2025);
        assert_eq!(years.len(), 33);
        assert!(YearRange::new(2000, 1999).is_empty());
    }

    #[test]
    fn test_default_layouts_cover_both_price_blocks() {
        let layout = RegionalLayout::default();
        assert_eq!(layout.constant_rows.len(), layout.current_rows.len());
        assert_eq!(layout.current_rows.end, layout.row_count);
        assert_eq!(IndustryLayout::default().data_rows.len(), 184);
    }

    #[test]
    fn test_source_paths() {
        let config = EtlConfig::default();
        assert_eq!(
            config.industry_source_path(CONSTANT_DATASET),
            PathBuf::from("./source_industrias/PIBT_2.xlsx")
        );
        assert_eq!(
            config.regional_source_path("méx"),
            PathBuf::from("./source_estatal/conjunto_de_datos_pibe_entidad_méx2023_r.csv")
        );
        assert_eq!(config.industry_output_path(), PathBuf::from("./pib_industrias.csv"));
    }

    #[test]
    fn test_from_vars_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PIB_OUTPUT_DIR", "/tmp/out"),
            ("PIB_REGIONAL_VINTAGE", " 2024 "),
            ("PIB_INDUSTRY_DIR", ""),
        ]);
        let config = EtlConfig::from_vars(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.regional_vintage, "2024");
        // blank values keep the default
        assert_eq!(config.industry_dir, PathBuf::from("./source_industrias"));
    }
}
