//! GDP by state: per-region CSV loading and reshaping.
//!
//! Each region file stacks both price bases by row: the constant-price block
//! first, the current-price block at a fixed offset further down, both listing
//! the same categories in the same order. Columns are periods.

use crate::config::{EtlConfig, RegionalLayout};
use crate::error::{EtlError, EtlResult, FormatError, FormatResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{region_key, Region, RegionalRecord, REGIONS};
use crate::parser::{parse_csv_file, ParseResult};
use crate::relabel::{
    clean_regional_label, relabel, split_category, REGIONAL_CODE_OVERRIDES,
    REGIONAL_NAME_OVERRIDES, REGIONAL_SEPARATOR,
};

use super::frame::Frame;

/// Constant- and current-price frames of one region.
#[derive(Debug, Clone)]
pub struct RegionFrames {
    pub constant: Frame<String>,
    pub current: Frame<String>,
}

/// Column key of a period header: its leading year token.
pub fn period_key(id: &str, header: &str, width: usize) -> FormatResult<String> {
    let key: String = header.trim().chars().take(width).collect();
    if key.chars().count() != width || !key.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::BadPeriodKey {
            id: id.to_string(),
            header: header.to_string(),
        });
    }
    Ok(key)
}

/// Split a parsed region file into its two price blocks.
///
/// The row count is checked against the layout before any slicing, so a
/// file with an extra or missing category fails instead of pairing
/// constant and current values from different rows.
pub fn frames_from_csv(id: &str, parsed: &ParseResult, layout: &RegionalLayout) -> FormatResult<RegionFrames> {
    if parsed.rows.len() != layout.row_count {
        return Err(FormatError::Shape {
            id: id.to_string(),
            what: "rows",
            expected: layout.row_count,
            actual: parsed.rows.len(),
        });
    }
    if parsed.headers.len() < 2 {
        return Err(FormatError::Shape {
            id: id.to_string(),
            what: "columns (label + periods)",
            expected: 2,
            actual: parsed.headers.len(),
        });
    }

    let index = parsed.headers[1..]
        .iter()
        .map(|h| period_key(id, h, layout.period_key_width))
        .collect::<FormatResult<Vec<String>>>()?;

    let mut labels = Vec::with_capacity(parsed.rows.len());
    let mut values = Vec::with_capacity(parsed.rows.len());
    for (i, row) in parsed.rows.iter().enumerate() {
        let label = clean_regional_label(&row[0].as_text());
        if label.is_empty() {
            return Err(FormatError::EmptyLabel { id: id.to_string(), row: i });
        }
        labels.push(label);
        values.push(row[1..=index.len()].iter().map(|c| c.as_f64()).collect::<Vec<_>>());
    }

    let block = |range: std::ops::Range<usize>, basis: &str| {
        Frame::from_category_rows(
            &format!("{id}/{basis}"),
            index.clone(),
            labels[range.clone()].to_vec(),
            values[range].to_vec(),
        )
    };

    Ok(RegionFrames {
        constant: block(layout.constant_rows.clone(), "constant")?,
        current: block(layout.current_rows.clone(), "current")?,
    })
}

/// Load one region's file from the configured directory.
pub fn load_region(config: &EtlConfig, region: &Region) -> EtlResult<RegionFrames> {
    let path = config.regional_source_path(region.abbreviation);
    log_info(format!("Reading {} ({})", region.name, path.display()));

    let parsed = parse_csv_file(region.abbreviation, &path)?;
    let frames = frames_from_csv(region.abbreviation, &parsed, &config.regional_layout)?;
    Ok(frames)
}

/// One record per (category, period) of the region's constant-price block.
///
/// Codes and names are the raw split; [`finalize_regional`] normalizes them.
pub fn reshape_region(region: &Region, frames: &RegionFrames) -> Vec<RegionalRecord> {
    let RegionFrames { constant, current } = frames;
    let mut records = Vec::with_capacity(constant.columns().len() * constant.len());

    for label in constant.columns() {
        if !current.has_column(label) {
            log_warning(format!("{}: '{}' has no current-price row", region.name, label));
        }
        let key = split_category(label, REGIONAL_SEPARATOR);

        if let Some(series) = constant.series(label) {
            for (period, value) in series {
                records.push(RegionalRecord {
                    period: period.clone(),
                    region_key: region.key,
                    region: region.name.to_string(),
                    code: key.code.clone(),
                    name: key.name.clone(),
                    constant: value,
                    current: current.get(label, period),
                });
            }
        }
    }

    records
}

/// Normalize codes and names and attach each record's `CVE_ENT`.
///
/// Missing values pass through untouched.
pub fn finalize_regional(records: Vec<RegionalRecord>) -> EtlResult<Vec<RegionalRecord>> {
    records
        .into_iter()
        .map(|r| {
            let key = region_key(&r.region).ok_or_else(|| EtlError::KeyMismatch {
                id: "region table".to_string(),
                key: r.region.clone(),
            })?;
            Ok(RegionalRecord {
                region_key: key,
                code: relabel(REGIONAL_CODE_OVERRIDES, r.code),
                name: relabel(REGIONAL_NAME_OVERRIDES, r.name),
                ..r
            })
        })
        .collect()
}

/// Full state dataset, all regions concatenated in source order.
pub fn build_regional(config: &EtlConfig) -> EtlResult<Vec<RegionalRecord>> {
    let mut records = Vec::new();
    for region in REGIONS.iter() {
        let frames = load_region(config, region)?;
        records.extend(reshape_region(region, &frames));
    }

    let records = finalize_regional(records)?;
    let missing = records
        .iter()
        .filter(|r| r.constant.is_none() || r.current.is_none())
        .count();
    if missing > 0 {
        log_warning(format!("{} state records carry a missing value", missing));
    }
    log_success(format!(
        "{} state records from {} regions (layout {})",
        records.len(),
        REGIONS.len(),
        config.regional_layout.version
    ));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_bytes_auto;

    fn layout() -> RegionalLayout {
        RegionalLayout {
            version: "test",
            row_count: 6,
            constant_rows: 0..2,
            current_rows: 4..6,
            period_key_width: 4,
        }
    }

    fn csv() -> String {
        [
            "Concepto,2003R,2004R,2005P",
            "1|<C1>B.1bP---Producto interno bruto,100,110,120",
            "1|<C1>Actividad económica total,90,95,99",
            "2|Variación porcentual,1,2,3",
            "2|Variación porcentual 2,1,2,3",
            "3|<C1>B.1bP---Producto interno bruto,200,220,240",
            "3|<C1>Actividad económica total,180,,198",
        ]
        .join("\n")
    }

    fn frames() -> RegionFrames {
        let parsed = parse_bytes_auto("nac", csv().as_bytes()).unwrap();
        frames_from_csv("nac", &parsed, &layout()).unwrap()
    }

    #[test]
    fn test_period_key_keeps_year_token() {
        assert_eq!(period_key("nac", "2003R", 4).unwrap(), "2003");
        assert_eq!(period_key("nac", "2022P ", 4).unwrap(), "2022");
        assert!(period_key("nac", "Concepto", 4).is_err());
        assert!(period_key("nac", "203", 4).is_err());
    }

    #[test]
    fn test_blocks_are_split_by_offset() {
        let f = frames();
        assert_eq!(f.constant.index(), &["2003", "2004", "2005"]);
        assert_eq!(f.constant.columns()[0], "B.1bP---Producto interno bruto");
        assert_eq!(f.current.get("B.1bP---Producto interno bruto", &"2004".to_string()), Some(220.0));
    }

    #[test]
    fn test_reshape_and_relabel() {
        let region = &REGIONS[0];
        let records = finalize_regional(reshape_region(region, &frames())).unwrap();

        assert_eq!(records.len(), 6);
        let first = &records[0];
        assert_eq!(first.period, "2003");
        assert_eq!(first.region, "Nacional");
        assert_eq!(first.region_key, 0);
        assert_eq!(first.code, "PIB");
        assert_eq!(first.name, "Producto interno bruto");
        assert_eq!(first.constant, Some(100.0));
        assert_eq!(first.current, Some(200.0));

        let vab = &records[4];
        assert_eq!(vab.code, "VAB");
        assert_eq!(vab.name, "Valor agregado bruto");
        assert_eq!(vab.period, "2004");
        // missing values are kept, not dropped
        assert_eq!(vab.current, None);
        assert_eq!(vab.constant, Some(95.0));
    }

    #[test]
    fn test_region_key_follows_name() {
        let region = REGIONS.iter().find(|r| r.abbreviation == "méx").unwrap();
        let records = finalize_regional(reshape_region(region, &frames())).unwrap();
        assert!(records.iter().all(|r| r.region_key == 15 && r.region == "Estado de México"));
    }

    #[test]
    fn test_unknown_region_name_is_a_key_mismatch() {
        let mut records = reshape_region(&REGIONS[1], &frames());
        records[0].region = "Atlantis".into();
        let err = finalize_regional(records).unwrap_err();
        assert!(matches!(err, EtlError::KeyMismatch { .. }));
    }

    #[test]
    fn test_row_count_is_checked_before_slicing() {
        let truncated: String = csv().lines().take(6).collect::<Vec<_>>().join("\n");
        let parsed = parse_bytes_auto("ags", truncated.as_bytes()).unwrap();
        let err = frames_from_csv("ags", &parsed, &layout()).unwrap_err();
        assert!(matches!(err, FormatError::Shape { expected: 6, actual: 5, .. }));
    }

    #[test]
    fn test_bad_period_header_fails() {
        let text = csv().replacen("2004R", "Total", 1);
        let parsed = parse_bytes_auto("bc", text.as_bytes()).unwrap();
        let err = frames_from_csv("bc", &parsed, &layout()).unwrap_err();
        assert!(matches!(err, FormatError::BadPeriodKey { .. }));
    }
}
