//! GDP by industry: workbook loading and wide-to-long reshaping.
//!
//! ```text
//! PIBT_2.xlsx ─┐                                   ┌─ relabel codes
//!              ├─ load ─▶ Frame<Period> ─▶ reshape ┤  ÷ 4
//! PIBT_3.xlsx ─┘   (one column per industry)       └─ drop incomplete rows
//! ```

use crate::config::{
    EtlConfig, IndustryLayout, YearRange, ANNUALIZATION_DIVISOR, CONSTANT_DATASET,
    CURRENT_DATASET,
};
use crate::error::{EtlResult, FormatError, FormatResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{IndustryRecord, Period};
use crate::parser::{read_first_sheet, SheetGrid};
use crate::periods::{assign_periods, expected_slot_count, period_slots};
use crate::relabel::{relabel, split_category, INDUSTRY_CODE_OVERRIDES, INDUSTRY_SEPARATOR};

use super::frame::Frame;

/// Build a period-indexed frame from an industry worksheet.
///
/// Rows in `layout.data_rows` become columns labelled by their trimmed
/// `"<code> - <name>"` text; every column right of the label column is a
/// period slot, labelled positionally by the canonicalizer.
pub fn frame_from_sheet(
    id: &str,
    grid: &SheetGrid,
    layout: &IndustryLayout,
    years: YearRange,
) -> FormatResult<Frame<Period>> {
    if grid.height() < layout.data_rows.end {
        return Err(FormatError::Shape {
            id: id.to_string(),
            what: "sheet rows",
            expected: layout.data_rows.end,
            actual: grid.height(),
        });
    }

    let first_value_col = layout.label_column + 1;
    let period_cols = grid.width().saturating_sub(first_value_col);
    if period_cols != expected_slot_count(years) {
        return Err(FormatError::Shape {
            id: id.to_string(),
            what: "period columns",
            expected: expected_slot_count(years),
            actual: period_cols,
        });
    }

    let index: Vec<Period> = period_slots(years).iter().filter_map(|s| s.period()).collect();
    let mut labels = Vec::with_capacity(layout.data_rows.len());
    let mut rows = Vec::with_capacity(layout.data_rows.len());

    for r in layout.data_rows.clone() {
        let label = grid.cell(r, layout.label_column).as_text().trim().to_string();
        if label.is_empty() {
            return Err(FormatError::EmptyLabel { id: id.to_string(), row: r });
        }

        let values: Vec<Option<f64>> = grid.row(r)[first_value_col..].iter().map(|c| c.as_f64()).collect();
        let quarters = assign_periods(id, years, values)?;

        labels.push(label);
        rows.push(quarters.into_iter().map(|(_, v)| v).collect());
    }

    Frame::from_category_rows(id, index, labels, rows)
}

/// Load one price basis (`PIBT_2` or `PIBT_3`) from the configured directory.
pub fn load_industry_source(config: &EtlConfig, dataset: &str) -> EtlResult<Frame<Period>> {
    let path = config.industry_source_path(dataset);
    log_info(format!("Reading {} ({})", dataset, path.display()));

    let grid = read_first_sheet(dataset, &path)?;
    let frame = frame_from_sheet(dataset, &grid, &config.industry_layout, config.years)?;
    if frame.is_empty() {
        log_warning(format!("{}: year range {:?} yields no quarters", dataset, config.years));
    }

    log_success(format!(
        "{}: sheet '{}', {} industries × {} quarters (layout {})",
        dataset,
        grid.sheet_name,
        frame.columns().len(),
        frame.len(),
        config.industry_layout.version
    ));
    Ok(frame)
}

/// One record per (industry, quarter) of the constant-price frame.
///
/// The current-price value is looked up by the same column label and
/// period; an industry missing from `current` yields empty values.
pub fn reshape_industries(constant: &Frame<Period>, current: &Frame<Period>) -> Vec<IndustryRecord> {
    let mut records = Vec::with_capacity(constant.columns().len() * constant.len());

    for label in constant.columns() {
        if !current.has_column(label) {
            log_warning(format!("'{}' has no current-price series", label));
        }
        let key = split_category(label, INDUSTRY_SEPARATOR);

        if let Some(series) = constant.series(label) {
            for (period, value) in series {
                records.push(IndustryRecord {
                    period: *period,
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

/// Normalize codes, de-annualize both values and drop incomplete rows.
///
/// Returns the kept records and the number dropped.
pub fn finalize_industries(records: Vec<IndustryRecord>) -> (Vec<IndustryRecord>, usize) {
    let total = records.len();
    let kept: Vec<IndustryRecord> = records
        .into_iter()
        .map(|r| IndustryRecord {
            code: relabel(INDUSTRY_CODE_OVERRIDES, r.code),
            constant: r.constant.map(|v| v / ANNUALIZATION_DIVISOR),
            current: r.current.map(|v| v / ANNUALIZATION_DIVISOR),
            ..r
        })
        .filter(IndustryRecord::is_complete)
        .collect();

    let dropped = total - kept.len();
    (kept, dropped)
}

/// Full industry dataset, ready to write.
pub fn build_industries(config: &EtlConfig) -> EtlResult<Vec<IndustryRecord>> {
    let constant = load_industry_source(config, CONSTANT_DATASET)?;
    let current = load_industry_source(config, CURRENT_DATASET)?;

    let records = reshape_industries(&constant, &current);
    let (records, dropped) = finalize_industries(records);
    if dropped > 0 {
        log_warning(format!("Dropped {} industry rows with a missing value", dropped));
    }
    log_success(format!("{} industry records", records.len()));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cell;

    /// A sheet laid out like the published workbooks, scaled down:
    /// title rows, then one label column and 7 slots per year.
    fn sheet(years: YearRange, categories: &[(&str, f64)]) -> (SheetGrid, IndustryLayout) {
        let slots = expected_slot_count(years);
        let mut rows: Vec<Vec<Cell>> = vec![vec![Cell::Text("Producto interno bruto trimestral".into())]];
        rows.push(vec![Cell::Empty; slots + 1]);
        for (label, base) in categories {
            let mut row = vec![Cell::Text(format!("  {label} "))];
            row.extend((0..slots).map(|i| Cell::Number(base + i as f64)));
            rows.push(row);
        }
        let layout = IndustryLayout {
            version: "test",
            label_column: 0,
            data_rows: 2..2 + categories.len(),
        };
        (SheetGrid::from_rows("Tabulado", rows), layout)
    }

    #[test]
    fn test_three_year_scenario_yields_twelve_rows() {
        let years = YearRange::new(1993, 1995);
        let (grid, layout) = sheet(years, &[("PIB - Producto Interno Bruto", 1000.0)]);

        let constant = frame_from_sheet("PIBT_2", &grid, &layout, years).unwrap();
        let current = frame_from_sheet("PIBT_3", &grid, &layout, years).unwrap();
        let (records, dropped) = finalize_industries(reshape_industries(&constant, &current));

        assert_eq!(dropped, 0);
        assert_eq!(records.len(), 12);
        assert!(records.iter().all(|r| r.code == "PIB" && r.name == "Producto Interno Bruto"));
        assert_eq!(records[0].period.to_string(), "1993-01-01");
        assert_eq!(records[11].period.to_string(), "1995-10-01");
    }

    #[test]
    fn test_values_are_deannualized() {
        let years = YearRange::new(1993, 1993);
        let (grid, layout) = sheet(years, &[("11 - Agricultura", 1000.0)]);
        let frame = frame_from_sheet("PIBT_2", &grid, &layout, years).unwrap();

        let (records, _) = finalize_industries(reshape_industries(&frame, &frame));
        // Q1 holds the literal 1000, Q2 1001; the aggregates (1004..1006) are gone
        assert_eq!(records[0].constant, Some(250.0));
        assert_eq!(records[0].current, Some(250.0));
        assert_eq!(records[1].constant, Some(250.25));
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_industry_without_current_series_is_dropped() {
        let years = YearRange::new(2000, 2000);
        let (grid_c, layout_c) = sheet(years, &[("11 - Agricultura", 1.0), ("21 - Minería", 2.0)]);
        let (grid_n, layout_n) = sheet(years, &[("11 - Agricultura", 5.0)]);

        let constant = frame_from_sheet("PIBT_2", &grid_c, &layout_c, years).unwrap();
        let current = frame_from_sheet("PIBT_3", &grid_n, &layout_n, years).unwrap();
        let records = reshape_industries(&constant, &current);
        assert_eq!(records.len(), 8);

        let (kept, dropped) = finalize_industries(records);
        assert_eq!(dropped, 4);
        assert!(kept.iter().all(|r| r.code == "11" && r.is_complete()));
    }

    #[test]
    fn test_aggregate_codes_are_normalized() {
        let years = YearRange::new(2000, 2000);
        let (grid, layout) = sheet(
            years,
            &[("____aB.1bP - Producto interno bruto", 1.0), ("Actividades primarias", 2.0)],
        );
        let frame = frame_from_sheet("PIBT_2", &grid, &layout, years).unwrap();
        let (records, _) = finalize_industries(reshape_industries(&frame, &frame));

        assert_eq!(records[0].code, "PIB");
        assert_eq!(records[0].name, "Producto interno bruto");
        assert_eq!(records[4].code, "1");
        assert_eq!(records[4].name, "Actividades primarias");
    }

    #[test]
    fn test_wrong_column_count_fails() {
        let (grid, layout) = sheet(YearRange::new(1993, 1995), &[("PIB - Producto", 1.0)]);
        let err = frame_from_sheet("PIBT_2", &grid, &layout, YearRange::new(1993, 1996)).unwrap_err();
        assert!(matches!(err, FormatError::Shape { expected: 28, actual: 21, .. }));
    }

    #[test]
    fn test_short_sheet_fails() {
        let years = YearRange::new(1993, 1993);
        let (grid, mut layout) = sheet(years, &[("PIB - Producto", 1.0)]);
        layout.data_rows = 2..10;
        let err = frame_from_sheet("PIBT_2", &grid, &layout, years).unwrap_err();
        assert!(matches!(err, FormatError::Shape { what: "sheet rows", .. }));
    }

    #[test]
    fn test_empty_label_fails() {
        let years = YearRange::new(1993, 1993);
        let (grid, mut layout) = sheet(years, &[("PIB - Producto", 1.0)]);
        layout.data_rows = 1..3;
        let err = frame_from_sheet("PIBT_2", &grid, &layout, years).unwrap_err();
        assert!(matches!(err, FormatError::EmptyLabel { row: 1, .. }));
    }
}
