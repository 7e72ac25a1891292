//! Catch input
//!
//! Clicks and key presses both become a `CatchAttempt`. Keys name the slot
//! they aim at; a click on the target does not need to.

use super::position::PositionName;

/// Where an attempt came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Key,
}

/// A single try at catching the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchAttempt {
    pub source: InputSource,
    /// Slot the attempt aims at, if any
    pub hint: Option<PositionName>,
}

impl CatchAttempt {
    /// Click or tap on the target itself
    pub fn pointer() -> Self {
        Self {
            source: InputSource::Pointer,
            hint: None,
        }
    }

    /// Key press aimed at `name`
    pub fn key(name: PositionName) -> Self {
        Self {
            source: InputSource::Key,
            hint: Some(name),
        }
    }

    /// Attempt for a `KeyboardEvent.key` value; `None` for keys that catch nothing
    pub fn from_key(key: &str) -> Option<Self> {
        PositionName::from_key(key).map(Self::key)
    }
}
