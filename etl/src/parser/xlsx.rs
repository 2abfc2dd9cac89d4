//! XLSX worksheet reader.
//!
//! calamine trims a worksheet to its used range; the grid returned here is
//! re-anchored at A1 so callers can address cells by their sheet position.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use super::Cell;
use crate::error::{SourceError, SourceResult};

/// A worksheet as a rectangular grid anchored at A1.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub sheet_name: String,
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl SheetGrid {
    pub fn from_rows(sheet_name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, Cell::Empty);
                r
            })
            .collect();
        Self { sheet_name: sheet_name.into(), rows, width }
    }

    /// Number of rows up to the last used one.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns up to the last used one.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

fn grid_from_range(sheet_name: &str, range: &Range<Data>) -> SheetGrid {
    let Some((end_row, end_col)) = range.end() else {
        return SheetGrid::from_rows(sheet_name, Vec::new());
    };

    let rows = (0..=end_row)
        .map(|r| {
            (0..=end_col)
                .map(|c| range.get_value((r, c)).map(to_cell).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();
    SheetGrid::from_rows(sheet_name, rows)
}

/// Read the first worksheet of a workbook.
pub fn read_first_sheet(id: &str, path: &Path) -> SourceResult<SheetGrid> {
    if !path.is_file() {
        return Err(SourceError::NotFound {
            id: id.to_string(),
            path: path.to_path_buf(),
        });
    }

    let workbook_err = |message: String| SourceError::Workbook { id: id.to_string(), message };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_err(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| workbook_err("workbook has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_err(e.to_string()))?;

    Ok(grid_from_range(&sheet_name, &range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    #[test]
    fn test_grid_is_anchored_at_a1() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Tabulado").unwrap();
        sheet.write_string(2, 1, "  PIB - Producto Interno Bruto ").unwrap();
        sheet.write_number(2, 3, 1000.0).unwrap();
        workbook.save(&path).unwrap();

        let grid = read_first_sheet("book", &path).unwrap();
        assert_eq!(grid.sheet_name, "Tabulado");
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.cell(0, 0), &Cell::Empty);
        assert_eq!(grid.cell(2, 1), &Cell::Text("  PIB - Producto Interno Bruto ".into()));
        assert_eq!(grid.cell(2, 3).as_f64(), Some(1000.0));
        assert_eq!(grid.cell(2, 2), &Cell::Empty);
        assert_eq!(grid.cell(50, 50), &Cell::Empty);
    }

    #[test]
    fn test_missing_workbook() {
        let dir = TempDir::new().unwrap();
        let err = read_first_sheet("PIBT_2", &dir.path().join("PIBT_2.xlsx")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[test]
    fn test_unreadable_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PIBT_2.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let err = read_first_sheet("PIBT_2", &path).unwrap_err();
        assert!(matches!(err, SourceError::Workbook { .. }));
    }
}
