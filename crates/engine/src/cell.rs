use serde::{Deserialize, Serialize};

/// A single cue sheet cell, tagged by content kind.
///
/// The generator never distinguishes "cell missing" from "cell empty":
/// both read as `Empty`, and `Empty` is the sentinel for blank rows,
/// unassigned paths, and absent labels throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    /// Build a cell from raw text (CSV fields, tests). Whitespace-only
    /// input is `Empty`. No numeric sniffing: delimited text keeps its
    /// string form and is coerced where a number is required.
    pub fn from_text(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Canonical string form. Whole-valued numbers render without a
    /// trailing decimal so a spreadsheet `2.0` reads back as `"2"`.
    pub fn canonical(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Numeric view: numbers as-is, numeric text parsed. `None` for
    /// `Empty` and for text that does not parse.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
        }
    }
}
