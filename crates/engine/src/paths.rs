use serde::{Deserialize, Serialize};

/// The three addressable console path classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathClass {
    Channel,
    Bus,
    AuxIn,
}

impl PathClass {
    /// Address prefix on the emitted command lines.
    pub fn prefix(&self) -> &'static str {
        match self {
            PathClass::Channel => "ch",
            PathClass::Bus => "bus",
            PathClass::AuxIn => "auxin",
        }
    }
}
