//! Error types
//!
//! Gameplay itself never fails: malformed actions are dropped as no-ops. The
//! variants here cover configuration faults, which indicate a bug in the host
//! rather than something a player can trigger.

use std::fmt;

use crate::sim::Mode;

#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// The settings mode table has no entry for this mode
    UnknownMode(Mode),
    /// A settings value breaks an invariant the simulation relies on
    InvalidSettings { field: &'static str, reason: String },
    /// Settings JSON could not be decoded
    SettingsParse(String),
    /// Settings file could not be read
    SettingsIo(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode(mode) => {
                write!(f, "no mode table entry for {mode:?}")
            }
            Self::InvalidSettings { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
            Self::SettingsParse(msg) => write!(f, "failed to parse settings: {msg}"),
            Self::SettingsIo(msg) => write!(f, "failed to read settings: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::SettingsParse(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        Self::SettingsIo(err.to_string())
    }
}
