/*!
Frame types for the QSP session guard.

This module defines the frame types a session understands and how
boundary type tags map onto them.
*/

use std::fmt;

use crate::core::constants::tags;

/// Protocol frame types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Handshake completion, establishes identity, epoch and mode
    Handshake,
    /// Epoch rotation
    Rekey,
    /// Application data at the current epoch
    AppData,
    /// Any other tag, kept verbatim for the violation report
    Unknown(String),
}

impl FrameType {
    /// Map a boundary type tag to a FrameType
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            tags::HANDSHAKE | tags::HANDSHAKE_DONE | tags::HANDSHAKE_SHORT => FrameType::Handshake,
            tags::REKEY => FrameType::Rekey,
            tags::APP_DATA => FrameType::AppData,
            other => FrameType::Unknown(other.to_string()),
        }
    }

    /// Canonical tag for this frame type
    pub fn as_tag(&self) -> &str {
        match self {
            FrameType::Handshake => tags::HANDSHAKE,
            FrameType::Rekey => tags::REKEY,
            FrameType::AppData => tags::APP_DATA,
            FrameType::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Category of an accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// INIT to ESTABLISHED
    Handshake,
    /// Epoch advanced by a REKEY frame
    Rekey,
    /// Application data accepted at the current epoch
    AppData,
}

impl TransitionKind {
    /// Category string reported to callers
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::Handshake => "handshake",
            TransitionKind::Rekey => "rekey",
            TransitionKind::AppData => "app-data",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
