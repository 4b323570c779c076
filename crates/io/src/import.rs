// Cue sheet import
//
// Spreadsheets (ods, xlsx, xls, xlsb) go through calamine's format
// auto-detection; delimited text (csv, tsv, txt) goes through the csv
// crate. Either way the result is the same fully buffered CueSheet.

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use cuegrid_engine::{CellValue, CueSheet};

/// Read the named sub-sheet of a cue sheet file into a [`CueSheet`].
///
/// The extension picks the reader; the CSV path ignores `sheet_name`
/// since delimited files carry a single sheet.
pub fn import(path: &Path, sheet_name: &str) -> Result<CueSheet, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" | "tsv" | "txt" => import_delimited(path),
        _ => import_workbook(path, sheet_name),
    }
}

fn import_workbook(path: &Path, sheet_name: &str) -> Result<CueSheet, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| format!("cannot read sheet '{}': {}", sheet_name, e))?;

    let mut sheet = CueSheet::new(sheet_name);

    // Data may not be anchored at A1; keep true coordinates so the
    // configured column layout lines up.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, data) in row.iter().enumerate() {
            let value = convert(data);
            if value.is_empty() {
                continue;
            }
            sheet.set(
                start_row as usize + row_idx,
                start_col as usize + col_idx,
                value,
            );
        }
    }
    Ok(sheet)
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::String(s) => CellValue::from_text(s),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // date cells are meaningless on a cue sheet; keep the serial
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
    }
}

// ── Delimited text ──────────────────────────────────────────────────

fn import_delimited(path: &Path) -> Result<CueSheet, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet");
    let mut sheet = CueSheet::new(name);

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("{}: {}", path.display(), e))?;
        for (col_idx, field) in record.iter().enumerate() {
            let value = CellValue::from_text(field);
            if value.is_empty() {
                continue;
            }
            sheet.set(row_idx, col_idx, value);
        }
    }
    Ok(sheet)
}

/// Read a delimited file as UTF-8, falling back to Windows-1252 when
/// the bytes do not decode (common for Excel-exported sheets).
fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut bytes = Vec::new();
    std::fs::File::open(path)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the field delimiter from the first lines. A candidate wins
/// when it yields more than one field and its field count holds across
/// the sample; ties go to the higher field count.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(10).collect();
    if sample.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in &[b'\t', b';', b','] {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| field_count(line, delim))
            .collect();

        let target = counts[0];
        if target <= 1 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn field_count(line: &str, delim: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}
