use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// A fully buffered cue sheet: ordered rows of tagged cells.
///
/// The sheet is loaded once before the scan begins and read-only from
/// then on. All access is tolerant: any out-of-range (row, col) reads
/// as `Empty`. That tolerance is load-bearing: the cue driver relies on
/// the empty sentinel to detect blank rows, unassigned paths, and
/// absent labels without bounds bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CueSheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl CueSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Never fails: anything out of range reads as `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Canonical string form of a cell; `""` for anything absent.
    pub fn text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).canonical()
    }

    /// Place a cell while building the grid (import, tests). Grows the
    /// grid as needed, so rows reached only by an `Empty` write still
    /// count toward the scan extent.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.rows[row];
        if r.len() <= col {
            r.resize(col + 1, CellValue::Empty);
        }
        r[col] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_empty() {
        let sheet = CueSheet::new("Sheet1");
        assert_eq!(*sheet.cell(3, 7), CellValue::Empty);
        assert_eq!(sheet.text(100, 100), "");
    }

    #[test]
    fn set_grows_the_grid() {
        let mut sheet = CueSheet::new("Sheet1");
        sheet.set(2, 3, CellValue::Text("Band".into()));

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.text(2, 3), "Band");
        assert_eq!(*sheet.cell(2, 0), CellValue::Empty);
        assert_eq!(*sheet.cell(0, 0), CellValue::Empty);
    }

    #[test]
    fn text_canonicalizes_numbers() {
        let mut sheet = CueSheet::new("Sheet1");
        sheet.set(0, 0, CellValue::Number(2.0));
        sheet.set(0, 1, CellValue::Number(1.5));

        assert_eq!(sheet.text(0, 0), "2");
        assert_eq!(sheet.text(0, 1), "1.5");
    }
}
