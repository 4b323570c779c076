// Show configuration
// Loaded from cuegrid.toml next to the input sheet (or the working
// directory); every field has a default mirroring the layout the tool
// shipped with, so a config file only needs to name what differs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name the CLI looks for beside the input spreadsheet.
pub const CONFIG_FILE: &str = "cuegrid.toml";

/// How a block of data columns maps onto console path numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathNumbering {
    /// Path number = `first` + column offset within the block.
    Linear { first: u32 },
    /// Path numbers are read from a dedicated header row aligned with
    /// the data columns. Used for layouts where the console patch is
    /// not contiguous.
    HeaderRow { row: usize },
}

/// A contiguous block of spreadsheet columns, one column per console path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathRange {
    /// 0-based column of the first path in the block.
    pub first_col: usize,
    /// Number of contiguous paths. 0 disables the class entirely.
    pub count: usize,
    pub numbering: PathNumbering,
}

impl Default for PathRange {
    fn default() -> Self {
        Self {
            first_col: 0,
            count: 0,
            numbering: PathNumbering::Linear { first: 1 },
        }
    }
}

/// DCA slot columns plus the label/color policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcaConfig {
    /// 0-based column of the first DCA slot.
    pub first_col: usize,
    /// Number of DCA slots (the console has 8).
    pub count: usize,

    /// Color for a label active this cue.
    pub active_color: String,
    /// Labels colored with `alt_label_color` instead (FX returns and the
    /// like that stay up across cues). Empty list disables the feature.
    pub alt_labels: Vec<String>,
    pub alt_label_color: String,

    /// Re-color a label that is unchanged on the next cue.
    pub same_on_next_cue: bool,
    pub same_on_next_cue_color: String,

    /// On slots empty this cue, show the next cue's label in the warning
    /// color so the operator sees what is coming.
    pub warn_on_next_cue: bool,
    pub warn_color: String,

    /// Color for a slot with no label at all.
    pub off_color: String,
}

impl Default for DcaConfig {
    fn default() -> Self {
        Self {
            first_col: 4,
            count: 8,
            active_color: "WH".to_string(),
            alt_labels: Vec::new(),
            alt_label_color: "MG".to_string(),
            same_on_next_cue: false,
            same_on_next_cue_color: "GN".to_string(),
            warn_on_next_cue: false,
            warn_color: "RD".to_string(),
            off_color: "OFF".to_string(),
        }
    }
}

/// FX-send automation: a negative group assignment additionally routes
/// the channel's send to this bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxSends {
    pub enabled: bool,
    /// Destination FX bus.
    pub bus: u32,
}

impl Default for FxSends {
    fn default() -> Self {
        Self { enabled: true, bus: 15 }
    }
}

/// Per-channel name columns; an empty cell inherits the nearest name
/// above it, so a name only needs to be entered on the cue it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelNames {
    pub enabled: bool,
    /// 0-based column of the name for the first channel.
    pub first_col: usize,
}

impl Default for ChannelNames {
    fn default() -> Self {
        Self { enabled: false, first_col: 0 }
    }
}

/// Explicit per-cue mute selectors layered over the DCA-driven mutes
/// (e.g. switching between two bass rigs on one band range).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraMutes {
    pub enabled: bool,
    /// First console channel of the affected range.
    pub first_channel: u32,
    /// Number of consecutive channels in the range.
    pub count: usize,
    /// 0-based columns holding the channel number to mute this cue.
    pub selector_cols: Vec<usize>,
}

impl Default for ExtraMutes {
    fn default() -> Self {
        Self {
            enabled: false,
            first_channel: 17,
            count: 8,
            selector_cols: Vec::new(),
        }
    }
}

/// Everything the generator needs to know about one show's sheet layout.
/// Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Sub-sheet holding the cue data.
    pub sheet_name: String,
    /// Header rows above the first cue row.
    pub skip_rows: usize,
    /// 0-based column of the cue number (integer or decimal sub-cue).
    pub cue_number_col: usize,
    /// 0-based column of the cue label.
    pub cue_label_col: usize,
    /// Cue-number cell content that ends the show.
    pub terminator: String,

    pub channels: PathRange,
    pub buses: PathRange,
    pub aux_ins: PathRange,
    pub dca: DcaConfig,

    pub fx_sends: FxSends,
    pub channel_names: ChannelNames,
    pub extra_mutes: ExtraMutes,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            skip_rows: 4,
            cue_number_col: 1,
            cue_label_col: 2,
            terminator: "END".to_string(),
            channels: PathRange {
                first_col: 14,
                count: 19,
                numbering: PathNumbering::HeaderRow { row: 0 },
            },
            buses: PathRange::default(),
            aux_ins: PathRange::default(),
            dca: DcaConfig::default(),
            fx_sends: FxSends::default(),
            channel_names: ChannelNames::default(),
            extra_mutes: ExtraMutes::default(),
        }
    }
}

impl ShowConfig {
    /// Parse a config file. Missing fields keep their defaults; a file
    /// that exists but does not parse is an error, never silently the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        toml::from_str(&contents).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Locate the config for an input sheet: `cuegrid.toml` beside the
    /// sheet first, then the working directory.
    pub fn find_for(input: &Path) -> Option<PathBuf> {
        let beside = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILE);
        if beside.exists() {
            return Some(beside);
        }
        let cwd = PathBuf::from(CONFIG_FILE);
        if cwd.exists() {
            return Some(cwd);
        }
        None
    }
}
