pub mod show;

pub use show::{
    ChannelNames, DcaConfig, ExtraMutes, FxSends, PathNumbering, PathRange, ShowConfig,
    CONFIG_FILE,
};
