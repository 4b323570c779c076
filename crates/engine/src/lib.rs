pub mod cell;
pub mod cue;
pub mod paths;
pub mod sheet;
pub mod snippet;

pub use cell::CellValue;
pub use cue::{parse_cue_number, CueRef};
pub use paths::PathClass;
pub use sheet::CueSheet;
pub use snippet::{generate_show, Snippet, SnippetSink};
