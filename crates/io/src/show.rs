// Show-index file (.shw) referencing every generated snippet

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cuegrid_engine::CueRef;

/// Fixed first line of the show file.
const SHOW_HEADER_TAG: &str = "#2.6#";
/// Editor stamp the console expects on the show line.
const SHOW_EDITOR_STAMP: &str = "X32-Edit 3.00";

pub fn show_file_name(show_name: &str) -> String {
    format!("{}.shw", show_name)
}

/// Write the show index, exactly once, after the scan: one cue line and
/// one snippet line per cue, both in sequence order.
pub fn write_show_index(
    dir: &Path,
    show_name: &str,
    cues: &[CueRef],
) -> Result<PathBuf, String> {
    let path = dir.join(show_file_name(show_name));
    let file =
        File::create(&path).map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    let mut out = BufWriter::new(file);

    write_lines(&mut out, show_name, cues)
        .and_then(|_| out.flush())
        .map_err(|e| format!("write error on {}: {}", path.display(), e))?;
    Ok(path)
}

fn write_lines(out: &mut impl Write, show_name: &str, cues: &[CueRef]) -> std::io::Result<()> {
    writeln!(out, "{}", SHOW_HEADER_TAG)?;
    writeln!(
        out,
        "show \"{}\" 0 0 0 0 0 0 0 0 0 0 \"{}\"",
        show_name, SHOW_EDITOR_STAMP
    )?;
    for (index, cue) in cues.iter().enumerate() {
        writeln!(
            out,
            "cue/{:03} {} \"{}\" 0 -1 {} 0 1 0 0",
            index, cue.number, cue.label, index
        )?;
    }
    for (index, cue) in cues.iter().enumerate() {
        writeln!(out, "snippet/{:03} \"{}\" 0 0 0 0 1", index, cue.label)?;
    }
    Ok(())
}
