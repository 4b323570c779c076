//! Per-cue snippet generation: the path processor, the DCA label
//! resolver, and the cue driver that walks the sheet.
//!
//! Everything here is pure computation over the buffered [`CueSheet`];
//! file writing sits behind the [`SnippetSink`] seam so the driver can
//! hand each snippet over before the scan advances.

use serde::{Deserialize, Serialize};

use cuegrid_config::{PathNumbering, PathRange, ShowConfig};

use crate::cue::{parse_cue_number, CueRef};
use crate::paths::PathClass;
use crate::sheet::CueSheet;

/// Fixed first token of every snippet file, before the quoted cue label.
pub const SNIPPET_HEADER_TAG: &str = "#2.1#";

/// One generated cue artifact: ordered command lines, ready to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    /// 0-based sequence index; also the output file number.
    pub index: usize,
    pub label: String,
    /// Command lines in emission order, header line first. The console
    /// replays them sequentially, so order is part of the contract.
    pub lines: Vec<String>,
}

/// Consumer of generated snippets. Each snippet arrives fully formed,
/// one at a time, in scan order; the file writer in cuegrid-io closes
/// each file before the driver moves to the next row, which is what
/// leaves earlier files on disk when a later row aborts the run.
pub trait SnippetSink {
    fn write_snippet(&mut self, snippet: &Snippet) -> Result<(), String>;
}

// ── Path processor ──────────────────────────────────────────────────

/// One path's assignment cell for the current cue.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Assignment {
    /// Empty cell: no group, the path is muted this cue.
    None,
    /// Signed group value. The magnitude selects the 1-based DCA group;
    /// a negative sign additionally routes the FX send (the operator
    /// convention this tool exists to reproduce).
    Group(i64),
}

fn read_assignment(sheet: &CueSheet, row: usize, col: usize) -> Result<Assignment, String> {
    let cell = sheet.cell(row, col);
    match cell.as_number() {
        Some(v) => Ok(Assignment::Group(v.round() as i64)),
        None if cell.is_empty() => Ok(Assignment::None),
        None => Err(format!(
            "invalid group assignment '{}' at row {}, column {}",
            cell.canonical(),
            row + 1,
            col + 1
        )),
    }
}

/// Console number of the path at `offset` within the range.
fn path_number(sheet: &CueSheet, range: &PathRange, offset: usize) -> Result<u32, String> {
    match range.numbering {
        PathNumbering::Linear { first } => Ok(first + offset as u32),
        PathNumbering::HeaderRow { row } => {
            let col = range.first_col + offset;
            let cell = sheet.cell(row, col);
            match cell.as_number() {
                Some(v) if v >= 0.0 => Ok(v.round() as u32),
                _ => Err(format!(
                    "invalid path number '{}' in header row {}, column {}",
                    cell.canonical(),
                    row + 1,
                    col + 1
                )),
            }
        }
    }
}

/// Single bit at the 1-based group position. The bitmask field holds 32
/// bits; a magnitude of 0 or above 32 cannot address a group.
fn group_bitmask(value: i64) -> Result<u32, String> {
    let group = value.unsigned_abs();
    if group == 0 || group > 32 {
        return Err(format!("DCA group {} out of range", value));
    }
    Ok(1u32 << (group - 1))
}

/// Generate the command block for one path class of one cue.
///
/// Emission order: mute-ons for every unassigned path, then every
/// path's group bitmask (0 clears a prior assignment), then mute-offs
/// for every assigned path, then, channels only and when enabled, the FX
/// send state for every path. Muting diffs against "is any group
/// assigned at all", never against the previous cue.
pub fn process_paths(
    sheet: &CueSheet,
    cfg: &ShowConfig,
    row: usize,
    range: &PathRange,
    class: PathClass,
) -> Result<Vec<String>, String> {
    let mut lines = Vec::new();
    if range.count == 0 {
        return Ok(lines);
    }

    let mut assignments = Vec::with_capacity(range.count);
    let mut numbers = Vec::with_capacity(range.count);
    for offset in 0..range.count {
        assignments.push(read_assignment(sheet, row, range.first_col + offset)?);
        numbers.push(path_number(sheet, range, offset)?);
    }

    let prefix = class.prefix();

    for (offset, assignment) in assignments.iter().enumerate() {
        if matches!(assignment, Assignment::None) {
            lines.push(format!("/{}/{:02}/mix/on OFF", prefix, numbers[offset]));
        }
    }

    for (offset, assignment) in assignments.iter().enumerate() {
        let mask = match assignment {
            Assignment::None => 0,
            Assignment::Group(v) => group_bitmask(*v).map_err(|e| {
                format!(
                    "{} at row {}, column {}",
                    e,
                    row + 1,
                    range.first_col + offset + 1
                )
            })?,
        };
        lines.push(format!("/{}/{:02}/grp/dca {}", prefix, numbers[offset], mask));
    }

    for (offset, assignment) in assignments.iter().enumerate() {
        if matches!(assignment, Assignment::Group(_)) {
            lines.push(format!("/{}/{:02}/mix/on ON", prefix, numbers[offset]));
        }
    }

    if class == PathClass::Channel && cfg.fx_sends.enabled {
        for (offset, assignment) in assignments.iter().enumerate() {
            let on = matches!(assignment, Assignment::Group(v) if *v < 0);
            lines.push(format!(
                "/{}/{:02}/mix/{:02} {}",
                prefix,
                numbers[offset],
                cfg.fx_sends.bus,
                if on { "ON" } else { "OFF" }
            ));
        }
    }

    Ok(lines)
}

// ── Read-only lookups ───────────────────────────────────────────────

/// The value `col` holds on the next cue-bearing row below `row`.
///
/// Blank rows are skipped; the terminator row and the end of the sheet
/// both read as absent. Pure query over the buffered grid; the
/// driver's scan position is untouched.
pub fn next_cue_label(sheet: &CueSheet, cfg: &ShowConfig, row: usize, col: usize) -> String {
    if sheet.text(row, cfg.cue_number_col) == cfg.terminator {
        return String::new();
    }
    for search in (row + 1)..sheet.row_count() {
        let cue = sheet.text(search, cfg.cue_number_col);
        if cue.is_empty() {
            continue;
        }
        if cue == cfg.terminator {
            return String::new();
        }
        return sheet.text(search, col);
    }
    String::new()
}

/// Effective channel name at a cue row: the nearest non-empty cell in
/// the name column at or above the row, stopping at the header area.
/// Names only need to be entered on the cue where they change.
pub fn channel_name_at(sheet: &CueSheet, cfg: &ShowConfig, row: usize, col: usize) -> String {
    let mut search = row;
    loop {
        let name = sheet.text(search, col);
        if !name.is_empty() || search <= cfg.skip_rows {
            return name;
        }
        search -= 1;
    }
}

// ── DCA label resolver ──────────────────────────────────────────────

/// Resolve one DCA slot's label and color for the current cue.
///
/// A label on the current row wins, colored by the exception list, the
/// same-on-next-cue match, or the active color, in that order. An empty
/// slot shows the next cue's label in the warning color when that
/// feature is on, and is otherwise blank with the off color.
pub fn resolve_dca(
    sheet: &CueSheet,
    cfg: &ShowConfig,
    row: usize,
    slot: usize,
) -> (String, String) {
    let dca = &cfg.dca;
    let col = dca.first_col + slot;
    let label = sheet.text(row, col);

    if !label.is_empty() {
        let color = if dca.alt_labels.iter().any(|l| l == &label) {
            dca.alt_label_color.clone()
        } else if dca.same_on_next_cue && label == next_cue_label(sheet, cfg, row, col) {
            dca.same_on_next_cue_color.clone()
        } else {
            dca.active_color.clone()
        };
        return (label, color);
    }

    if dca.warn_on_next_cue {
        let upcoming = next_cue_label(sheet, cfg, row, col);
        if !upcoming.is_empty() {
            return (upcoming, dca.warn_color.clone());
        }
    }

    (String::new(), dca.off_color.clone())
}

fn dca_lines(sheet: &CueSheet, cfg: &ShowConfig, row: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for slot in 0..cfg.dca.count {
        let (label, color) = resolve_dca(sheet, cfg, row, slot);
        lines.push(format!("/dca/{}/config/name \"{}\"", slot + 1, label));
        lines.push(format!("/dca/{}/config/color {}", slot + 1, color));
    }
    lines
}

// ── Optional channel automation ─────────────────────────────────────

fn channel_name_lines(
    sheet: &CueSheet,
    cfg: &ShowConfig,
    row: usize,
) -> Result<Vec<String>, String> {
    let mut lines = Vec::new();
    if !cfg.channel_names.enabled {
        return Ok(lines);
    }
    for offset in 0..cfg.channels.count {
        let name = channel_name_at(sheet, cfg, row, cfg.channel_names.first_col + offset);
        if name.is_empty() {
            continue;
        }
        let number = path_number(sheet, &cfg.channels, offset)?;
        lines.push(format!("/ch/{:02}/config/name \"{}\"", number, name));
    }
    Ok(lines)
}

/// Layered explicit mutes: a channel in the configured range is muted
/// iff its number appears in any selector column for this row, and is
/// explicitly unmuted otherwise. Emitted after the DCA-driven commands;
/// a repeated address is intentional: the console replays the file
/// sequentially and the last command wins.
fn extra_mute_lines(
    sheet: &CueSheet,
    cfg: &ShowConfig,
    row: usize,
) -> Result<Vec<String>, String> {
    let mut lines = Vec::new();
    let mutes = &cfg.extra_mutes;
    if !mutes.enabled {
        return Ok(lines);
    }

    let mut selected = Vec::new();
    for &col in &mutes.selector_cols {
        let cell = sheet.cell(row, col);
        if cell.is_empty() {
            continue;
        }
        match cell.as_number() {
            Some(v) => selected.push(v.round() as i64),
            None => {
                return Err(format!(
                    "invalid mute selector '{}' at row {}, column {}",
                    cell.canonical(),
                    row + 1,
                    col + 1
                ))
            }
        }
    }

    for offset in 0..mutes.count {
        let channel = mutes.first_channel + offset as u32;
        let mute = selected.iter().any(|&s| s == i64::from(channel));
        lines.push(format!(
            "/ch/{:02}/mix/on {}",
            channel,
            if mute { "OFF" } else { "ON" }
        ));
    }
    Ok(lines)
}

// ── Cue driver ──────────────────────────────────────────────────────

fn build_snippet(
    sheet: &CueSheet,
    cfg: &ShowConfig,
    row: usize,
    index: usize,
    label: &str,
) -> Result<Snippet, String> {
    let mut lines = vec![format!("{} \"{}\" 0 0 0 0 0", SNIPPET_HEADER_TAG, label)];
    lines.extend(process_paths(sheet, cfg, row, &cfg.channels, PathClass::Channel)?);
    lines.extend(process_paths(sheet, cfg, row, &cfg.buses, PathClass::Bus)?);
    lines.extend(process_paths(sheet, cfg, row, &cfg.aux_ins, PathClass::AuxIn)?);
    lines.extend(channel_name_lines(sheet, cfg, row)?);
    lines.extend(extra_mute_lines(sheet, cfg, row)?);
    lines.extend(dca_lines(sheet, cfg, row));
    Ok(Snippet {
        index,
        label: label.to_string(),
        lines,
    })
}

/// Walk the sheet and generate every cue, in a single forward scan.
///
/// Rows with an empty cue-number cell are skipped; the terminator row
/// stops the scan without producing output; anything else must parse as
/// a cue number or the run aborts with the offending row. Each snippet
/// is handed to the sink before the scan advances, so snippets written
/// before a fatal error stay on disk.
pub fn generate_show(
    sheet: &CueSheet,
    cfg: &ShowConfig,
    sink: &mut dyn SnippetSink,
) -> Result<Vec<CueRef>, String> {
    let mut cues: Vec<CueRef> = Vec::new();

    for row in cfg.skip_rows..sheet.row_count() {
        let cue_cell = sheet.text(row, cfg.cue_number_col);
        if cue_cell.is_empty() {
            continue;
        }
        if cue_cell == cfg.terminator {
            break;
        }

        let number =
            parse_cue_number(&cue_cell).map_err(|e| format!("{} at row {}", e, row + 1))?;
        let label = sheet.text(row, cfg.cue_label_col);
        let snippet = build_snippet(sheet, cfg, row, cues.len(), &label)?;
        sink.write_snippet(&snippet)?;
        cues.push(CueRef { number, label });
    }

    Ok(cues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use cuegrid_config::{ChannelNames, DcaConfig, ExtraMutes, FxSends};

    /// Sink that keeps every snippet in memory.
    #[derive(Default)]
    struct VecSink(Vec<Snippet>);

    impl SnippetSink for VecSink {
        fn write_snippet(&mut self, snippet: &Snippet) -> Result<(), String> {
            self.0.push(snippet.clone());
            Ok(())
        }
    }

    /// Build a sheet from raw text rows; "" cells stay empty.
    fn sheet(rows: &[&[&str]]) -> CueSheet {
        let mut out = CueSheet::new("Sheet1");
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                out.set(r, c, CellValue::from_text(text));
            }
        }
        out
    }

    /// Small layout: cue in col 0, label in col 1, two channels in cols
    /// 2-3 numbered 1-2, two DCA slots in cols 4-5. Row 0 is a header.
    fn config() -> ShowConfig {
        ShowConfig {
            skip_rows: 1,
            cue_number_col: 0,
            cue_label_col: 1,
            channels: PathRange {
                first_col: 2,
                count: 2,
                numbering: PathNumbering::Linear { first: 1 },
            },
            dca: DcaConfig {
                first_col: 4,
                count: 2,
                ..DcaConfig::default()
            },
            fx_sends: FxSends {
                enabled: false,
                bus: 15,
            },
            ..ShowConfig::default()
        }
    }

    // ── process_paths ───────────────────────────────────────────────

    #[test]
    fn emission_order_is_mute_ons_then_bitmasks_then_mute_offs() {
        let cfg = config();
        let sheet = sheet(&[&["", ""], &["1", "Opening", "2", ""]]);

        let lines = process_paths(&sheet, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap();
        assert_eq!(
            lines,
            vec![
                "/ch/02/mix/on OFF",
                "/ch/01/grp/dca 2",
                "/ch/02/grp/dca 0",
                "/ch/01/mix/on ON",
            ]
        );
    }

    #[test]
    fn bitmask_uses_magnitude_of_rounded_value() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "", "4", "-3"]]);

        let lines = process_paths(&sheet, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap();
        assert!(lines.contains(&"/ch/01/grp/dca 8".to_string()));
        assert!(lines.contains(&"/ch/02/grp/dca 4".to_string()));
        // both assigned, so both unmute
        assert!(lines.contains(&"/ch/01/mix/on ON".to_string()));
        assert!(lines.contains(&"/ch/02/mix/on ON".to_string()));
    }

    #[test]
    fn zero_count_class_emits_nothing() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "", "2", "3"]]);

        let lines = process_paths(&sheet, &cfg, 1, &cfg.buses, PathClass::Bus).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn group_out_of_range_is_fatal() {
        let cfg = config();
        let zero = sheet(&[&[""], &["1", "", "0", ""]]);
        let err = process_paths(&zero, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap_err();
        assert!(err.contains("out of range"), "{err}");

        let big = sheet(&[&[""], &["1", "", "33", ""]]);
        assert!(process_paths(&big, &cfg, 1, &cfg.channels, PathClass::Channel).is_err());
    }

    #[test]
    fn non_numeric_assignment_is_fatal_and_names_the_cell() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "", "band", ""]]);

        let err = process_paths(&sheet, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap_err();
        assert!(err.contains("band"), "{err}");
        assert!(err.contains("row 2"), "{err}");
        assert!(err.contains("column 3"), "{err}");
    }

    #[test]
    fn numeric_text_assignments_are_accepted() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "", "2", "-1"]]);

        let lines = process_paths(&sheet, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap();
        assert!(lines.contains(&"/ch/01/grp/dca 2".to_string()));
        assert!(lines.contains(&"/ch/02/grp/dca 1".to_string()));
    }

    #[test]
    fn fx_sends_follow_the_sign_for_channels_only() {
        let mut cfg = config();
        cfg.fx_sends = FxSends {
            enabled: true,
            bus: 9,
        };
        let sheet = sheet(&[&[""], &["1", "", "-3", "2"]]);

        let lines = process_paths(&sheet, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap();
        let sends: Vec<&String> = lines.iter().filter(|l| l.contains("/mix/09")).collect();
        assert_eq!(sends, vec!["/ch/01/mix/09 ON", "/ch/02/mix/09 OFF"]);
        // send lines come after the mute-offs
        assert!(
            lines.iter().position(|l| l == "/ch/01/mix/09 ON").unwrap()
                > lines.iter().position(|l| l == "/ch/02/mix/on ON").unwrap()
        );

        // a bus range with the same cells gets no send lines
        let mut bus_cfg = cfg.clone();
        bus_cfg.buses = bus_cfg.channels.clone();
        let lines = process_paths(&sheet, &bus_cfg, 1, &bus_cfg.buses, PathClass::Bus).unwrap();
        assert!(lines.iter().all(|l| !l.contains("/mix/09")));
    }

    #[test]
    fn header_row_numbering_reads_console_patch() {
        let mut cfg = config();
        cfg.channels.numbering = PathNumbering::HeaderRow { row: 0 };
        let sheet = sheet(&[&["", "", "11", "14"], &["1", "", "2", ""]]);

        let lines = process_paths(&sheet, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap();
        assert_eq!(
            lines,
            vec![
                "/ch/14/mix/on OFF",
                "/ch/11/grp/dca 2",
                "/ch/14/grp/dca 0",
                "/ch/11/mix/on ON",
            ]
        );
    }

    #[test]
    fn malformed_path_number_header_is_fatal() {
        let mut cfg = config();
        cfg.channels.numbering = PathNumbering::HeaderRow { row: 0 };
        let sheet = sheet(&[&["", "", "Kick", "12"], &["1", "", "2", ""]]);

        let err = process_paths(&sheet, &cfg, 1, &cfg.channels, PathClass::Channel).unwrap_err();
        assert!(err.contains("header row 1"), "{err}");
    }

    // ── lookups ─────────────────────────────────────────────────────

    #[test]
    fn next_cue_label_skips_blank_rows() {
        let cfg = config();
        let sheet = sheet(&[
            &[""],
            &["1", "", "", "", "Band"],
            &["", "", "", "", "ignored"],
            &["2", "", "", "", "Horns"],
        ]);

        assert_eq!(next_cue_label(&sheet, &cfg, 1, 4), "Horns");
    }

    #[test]
    fn next_cue_label_stops_at_terminator_and_sheet_end() {
        let cfg = config();
        let ended = sheet(&[
            &[""],
            &["1", "", "", "", "Band"],
            &["END", "", "", "", "Horns"],
        ]);
        assert_eq!(next_cue_label(&ended, &cfg, 1, 4), "");

        let exhausted = sheet(&[&[""], &["1", "", "", "", "Band"]]);
        assert_eq!(next_cue_label(&exhausted, &cfg, 1, 4), "");
    }

    #[test]
    fn channel_name_carries_forward_from_rows_above() {
        let mut cfg = config();
        cfg.channel_names = ChannelNames {
            enabled: true,
            first_col: 6,
        };
        let sheet = sheet(&[
            &["", "", "", "", "", "", "Header", "Hdr2"],
            &["1", "", "", "", "", "", "Kick"],
            &["", "", "", "", "", "", ""],
            &["2", "", "", "", "", "", ""],
        ]);

        assert_eq!(channel_name_at(&sheet, &cfg, 3, 6), "Kick");
        // column 7 is named only in the header area, which never leaks
        assert_eq!(channel_name_at(&sheet, &cfg, 3, 7), "");
    }

    // ── DCA resolver ────────────────────────────────────────────────

    #[test]
    fn active_label_gets_active_color() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "", "", "", "Band"]]);

        assert_eq!(
            resolve_dca(&sheet, &cfg, 1, 0),
            ("Band".to_string(), "WH".to_string())
        );
    }

    #[test]
    fn alt_label_list_wins_over_active_color() {
        let mut cfg = config();
        cfg.dca.alt_labels = vec!["Reverb".to_string()];
        let sheet = sheet(&[&[""], &["1", "", "", "", "Reverb"]]);

        assert_eq!(
            resolve_dca(&sheet, &cfg, 1, 0),
            ("Reverb".to_string(), "MG".to_string())
        );
    }

    #[test]
    fn unchanged_label_gets_same_color_when_enabled() {
        let mut cfg = config();
        cfg.dca.same_on_next_cue = true;
        let sheet = sheet(&[
            &[""],
            &["1", "", "", "", "Band"],
            &["2", "", "", "", "Band"],
        ]);

        assert_eq!(
            resolve_dca(&sheet, &cfg, 1, 0),
            ("Band".to_string(), "GN".to_string())
        );
        // disabled: plain active color even though the label repeats
        let mut plain = config();
        plain.dca.same_on_next_cue = false;
        assert_eq!(resolve_dca(&sheet, &plain, 1, 0).1, "WH");
    }

    #[test]
    fn empty_slot_warns_of_upcoming_label_when_enabled() {
        let mut cfg = config();
        cfg.dca.warn_on_next_cue = true;
        let sheet = sheet(&[
            &[""],
            &["1", "", "", "", ""],
            &["2", "", "", "", "Horns"],
        ]);

        assert_eq!(
            resolve_dca(&sheet, &cfg, 1, 0),
            ("Horns".to_string(), "RD".to_string())
        );

        let disabled = config();
        assert_eq!(
            resolve_dca(&sheet, &disabled, 1, 0),
            (String::new(), "OFF".to_string())
        );
    }

    #[test]
    fn empty_slot_with_no_upcoming_label_is_off() {
        let mut cfg = config();
        cfg.dca.warn_on_next_cue = true;
        let sheet = sheet(&[&[""], &["1", "", "", "", ""], &["END"]]);

        assert_eq!(
            resolve_dca(&sheet, &cfg, 1, 0),
            (String::new(), "OFF".to_string())
        );
    }

    // ── extra mutes ─────────────────────────────────────────────────

    #[test]
    fn extra_mutes_select_by_channel_number() {
        let mut cfg = config();
        cfg.extra_mutes = ExtraMutes {
            enabled: true,
            first_channel: 5,
            count: 3,
            selector_cols: vec![8],
        };
        let mut grid = sheet(&[&[""], &["1", "", "", ""]]);
        grid.set(1, 8, CellValue::from_text("6"));

        let lines = extra_mute_lines(&grid, &cfg, 1).unwrap();
        assert_eq!(
            lines,
            vec!["/ch/05/mix/on ON", "/ch/06/mix/on OFF", "/ch/07/mix/on ON"]
        );
    }

    #[test]
    fn non_numeric_mute_selector_is_fatal() {
        let mut cfg = config();
        cfg.extra_mutes = ExtraMutes {
            enabled: true,
            first_channel: 5,
            count: 2,
            selector_cols: vec![8],
        };
        let mut grid = sheet(&[&[""], &["1"]]);
        grid.set(1, 8, CellValue::from_text("bass"));

        let err = extra_mute_lines(&grid, &cfg, 1).unwrap_err();
        assert!(err.contains("bass"), "{err}");
    }

    // ── cue driver ──────────────────────────────────────────────────

    #[test]
    fn three_row_round_trip() {
        let cfg = config();
        let sheet = sheet(&[
            &["Cue", "Label", "Ch 1", "Ch 2"],
            &["1", "Opening", "2", ""],
            &["2", "Blackout", "", ""],
            &["END"],
        ]);

        let mut sink = VecSink::default();
        let cues = generate_show(&sheet, &cfg, &mut sink).unwrap();

        assert_eq!(
            cues,
            vec![
                CueRef {
                    number: 100,
                    label: "Opening".to_string()
                },
                CueRef {
                    number: 200,
                    label: "Blackout".to_string()
                },
            ]
        );
        assert_eq!(sink.0.len(), 2);

        let first = &sink.0[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.lines[0], "#2.1# \"Opening\" 0 0 0 0 0");
        assert!(first.lines.contains(&"/ch/01/grp/dca 2".to_string()));
        assert!(first.lines.contains(&"/ch/01/mix/on ON".to_string()));

        let second = &sink.0[1];
        assert_eq!(second.index, 1);
        assert!(second.lines.contains(&"/ch/01/grp/dca 0".to_string()));
        assert!(second.lines.contains(&"/ch/01/mix/on OFF".to_string()));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let cfg = config();
        let sheet = sheet(&[
            &[""],
            &["1", "One"],
            &["", "note to the operator"],
            &["2", "Two"],
        ]);

        let mut sink = VecSink::default();
        let cues = generate_show(&sheet, &cfg, &mut sink).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(sink.0.len(), 2);
    }

    #[test]
    fn sub_cue_numbers_are_normalized() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["2.5", "Half"]]);

        let cues = generate_show(&sheet, &cfg, &mut VecSink::default()).unwrap();
        assert_eq!(cues[0].number, 250);
    }

    #[test]
    fn terminator_row_produces_no_output_and_stops_the_scan() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "One"], &["END", "ignored"], &["3", "Never"]]);

        let mut sink = VecSink::default();
        let cues = generate_show(&sheet, &cfg, &mut sink).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(sink.0.len(), 1);
    }

    #[test]
    fn invalid_cue_number_aborts_after_earlier_snippets() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "One"], &["abc", "Bad"], &["2", "Never"]]);

        let mut sink = VecSink::default();
        let err = generate_show(&sheet, &cfg, &mut sink).unwrap_err();
        assert!(err.contains("abc"), "{err}");
        assert!(err.contains("row 3"), "{err}");
        // the first cue was already handed to the sink
        assert_eq!(sink.0.len(), 1);
    }

    #[test]
    fn header_area_rows_are_never_scanned() {
        let cfg = config();
        // a stray value in the header row would otherwise parse as a cue
        let sheet = sheet(&[&["99", "header"], &["1", "One"]]);

        let cues = generate_show(&sheet, &cfg, &mut VecSink::default()).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].number, 100);
    }

    #[test]
    fn dca_labels_close_out_every_snippet() {
        let cfg = config();
        let sheet = sheet(&[&[""], &["1", "One", "", "", "Band", ""]]);

        let mut sink = VecSink::default();
        generate_show(&sheet, &cfg, &mut sink).unwrap();

        let lines = &sink.0[0].lines;
        let n = lines.len();
        assert_eq!(lines[n - 4], "/dca/1/config/name \"Band\"");
        assert_eq!(lines[n - 3], "/dca/1/config/color WH");
        assert_eq!(lines[n - 2], "/dca/2/config/name \"\"");
        assert_eq!(lines[n - 1], "/dca/2/config/color OFF");
    }
}
