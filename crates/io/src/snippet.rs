// Per-cue snippet files (.snp)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use cuegrid_engine::{Snippet, SnippetSink};

/// Output file name for one cue: `<show>.<NNN>.snp`.
pub fn snippet_file_name(show_name: &str, index: usize) -> String {
    format!("{}.{:03}.snp", show_name, index)
}

/// Writes each snippet to its own file in the output directory.
///
/// Every file is created, written, flushed and closed before the call
/// returns, so the cue driver never has two artifacts open at once and
/// files written before a fatal error stay on disk untouched.
pub struct SnippetFileWriter {
    dir: PathBuf,
    show_name: String,
    written: Vec<PathBuf>,
}

impl SnippetFileWriter {
    pub fn new(dir: impl Into<PathBuf>, show_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            show_name: show_name.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in cue order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SnippetSink for SnippetFileWriter {
    fn write_snippet(&mut self, snippet: &Snippet) -> Result<(), String> {
        let path = self
            .dir
            .join(snippet_file_name(&self.show_name, snippet.index));
        let file = File::create(&path)
            .map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
        let mut out = BufWriter::new(file);
        for line in &snippet.lines {
            writeln!(out, "{}", line)
                .map_err(|e| format!("write error on {}: {}", path.display(), e))?;
        }
        out.flush()
            .map_err(|e| format!("write error on {}: {}", path.display(), e))?;
        self.written.push(path);
        Ok(())
    }
}
