use serde::{Deserialize, Serialize};

/// One emitted cue: normalized number plus display label, accumulated
/// in scan order for the show-index writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueRef {
    pub number: i64,
    pub label: String,
}

/// Parse a cue-number cell into its normalized integer key.
///
/// Cue numbers may carry up to two decimal digits of sub-cue precision
/// ("2.5", "10.25"). The console wants an integer key, so the value is
/// scaled by 100 and rounded: "2.5" -> 250, "1" -> 100.
pub fn parse_cue_number(cell: &str) -> Result<i64, String> {
    let value: f64 = cell
        .trim()
        .parse()
        .map_err(|_| format!("invalid cue number '{}'", cell.trim()))?;
    Ok((value * 100.0).round() as i64)
}
