//! Domain models for the PIB datasets.
//!
//! - [`Period`] - quarter-start date used as the industry row index
//! - [`Region`] - the 33 fixed entities (national aggregate + 32 states)
//! - [`IndustryRecord`] / [`RegionalRecord`] - one output CSV row each
//!
//! Field order in the record structs is the column order of the output files.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Period
// =============================================================================

/// First day of a calendar quarter (`YYYY-01-01`, `-04-01`, `-07-01`, `-10-01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Period(NaiveDate);

impl Period {
    /// Quarter `quarter` (1..=4) of `year`.
    pub fn quarter(year: i32, quarter: u32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// =============================================================================
// Regions
// =============================================================================

/// A federal entity, or the national aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// `CVE_ENT`: 0 for the nation, 1..=32 for the states.
    pub key: u8,
    /// Token used in the source file name.
    pub abbreviation: &'static str,
    /// Display name written to `ENTIDAD`.
    pub name: &'static str,
}

const fn region(key: u8, abbreviation: &'static str, name: &'static str) -> Region {
    Region { key, abbreviation, name }
}

/// All entities, in source order.
pub const REGIONS: [Region; 33] = [
    region(0, "nac", "Nacional"),
    region(1, "ags", "Aguascalientes"),
    region(2, "bc", "Baja California"),
    region(3, "bcs", "Baja California Sur"),
    region(4, "camp", "Campeche"),
    region(5, "coah", "Coahuila"),
    region(6, "col", "Colima"),
    region(7, "chis", "Chiapas"),
    region(8, "chih", "Chihuahua"),
    region(9, "cdmx", "Ciudad de México"),
    region(10, "dgo", "Durango"),
    region(11, "gto", "Guanajuato"),
    region(12, "gro", "Guerrero"),
    region(13, "hgo", "Hidalgo"),
    region(14, "jal", "Jalisco"),
    region(15, "méx", "Estado de México"),
    region(16, "mich", "Michoacán"),
    region(17, "mor", "Morelos"),
    region(18, "nay", "Nayarit"),
    region(19, "nl", "Nuevo León"),
    region(20, "oax", "Oaxaca"),
    region(21, "pue", "Puebla"),
    region(22, "qro", "Querétaro"),
    region(23, "qr", "Quintana Roo"),
    region(24, "slp", "San Luis Potosí"),
    region(25, "sin", "Sinaloa"),
    region(26, "son", "Sonora"),
    region(27, "tab", "Tabasco"),
    region(28, "tamps", "Tamaulipas"),
    region(29, "tlax", "Tlaxcala"),
    region(30, "ver", "Veracruz"),
    region(31, "yuc", "Yucatán"),
    region(32, "zac", "Zacatecas"),
];

static KEYS_BY_NAME: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| REGIONS.iter().map(|r| (r.name, r.key)).collect());

/// `CVE_ENT` for an entity display name.
pub fn region_key(name: &str) -> Option<u8> {
    KEYS_BY_NAME.get(name).copied()
}

// =============================================================================
// Output records
// =============================================================================

/// One row of `pib_industrias.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryRecord {
    #[serde(rename = "PERIODO")]
    pub period: Period,
    #[serde(rename = "CLAVE_INDUSTRIA")]
    pub code: String,
    #[serde(rename = "INDUSTRIA")]
    pub name: String,
    #[serde(rename = "VALOR_CONSTANTE")]
    pub constant: Option<f64>,
    #[serde(rename = "VALOR_CORRIENTE")]
    pub current: Option<f64>,
}

impl IndustryRecord {
    pub fn is_complete(&self) -> bool {
        self.constant.is_some() && self.current.is_some()
    }
}

/// One row of `pib_estatal.csv`.
///
/// The state series are annual, so `period` is the 4-character year key of
/// the source column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalRecord {
    #[serde(rename = "PERIODO")]
    pub period: String,
    #[serde(rename = "CVE_ENT")]
    pub region_key: u8,
    #[serde(rename = "ENTIDAD")]
    pub region: String,
    #[serde(rename = "CLAVE_INDUSTRIA")]
    pub code: String,
    #[serde(rename = "INDUSTRIA")]
    pub name: String,
    #[serde(rename = "VALOR_CONSTANTE")]
    pub constant: Option<f64>,
    #[serde(rename = "VALOR_CORRIENTE")]
    pub current: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_quarter_start_months() {
        let months: Vec<u32> = (1..=4)
            .map(|q| Period::quarter(2020, q).unwrap().date().month())
            .collect();
        assert_eq!(months, vec![1, 4, 7, 10]);
        assert!(Period::quarter(2020, 0).is_none());
        assert!(Period::quarter(2020, 5).is_none());
    }

    #[test]
    fn test_period_display_is_iso_date() {
        let p = Period::quarter(1993, 3).unwrap();
        assert_eq!(p.to_string(), "1993-07-01");
    }

    #[test]
    fn test_region_table_keys_follow_source_order() {
        for (i, r) in REGIONS.iter().enumerate() {
            assert_eq!(r.key as usize, i);
            assert_eq!(region_key(r.name), Some(r.key));
        }
        assert_eq!(region_key("Nacional"), Some(0));
        assert_eq!(region_key("Estado de México"), Some(15));
        assert_eq!(region_key("Zacatecas"), Some(32));
        assert_eq!(region_key("Atlantis"), None);
    }
}
