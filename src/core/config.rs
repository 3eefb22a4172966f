/*!
Session configuration for the QSP session guard.

This module provides the knobs a session is constructed with: the mode
pinned when a handshake claims none, the handshake epoch minimum for each
boundary encoding, the legacy in-payload mode marker and an optional
pre-shared session identity.
*/

use crate::core::constants::{epochs, marker, DEFAULT_MODE};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Boundary encoding a frame was normalized from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum FrameEncoding {
    /// Keyed record (type, session_id, epoch, mode, payload)
    Structured,
    /// Type tag plus payload, identity and epoch passed positionally
    Legacy,
}

impl std::fmt::Display for FrameEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameEncoding::Structured => write!(f, "structured"),
            FrameEncoding::Legacy => write!(f, "legacy"),
        }
    }
}

/// Configuration for a single session
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Mode pinned when the handshake does not claim one
    pub default_mode: String,
    /// Minimum handshake epoch for structured records
    pub structured_min_handshake_epoch: u64,
    /// Minimum handshake epoch for legacy positional frames
    pub legacy_min_handshake_epoch: u64,
    /// Prefix opening a mode claim inside a legacy payload
    pub legacy_mode_prefix: Vec<u8>,
    /// Byte closing a mode claim inside a legacy payload
    pub legacy_mode_terminator: u8,
    /// Pre-shared identity the handshake must claim
    pub expected_session_id: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_mode: DEFAULT_MODE.to_string(),
            structured_min_handshake_epoch: epochs::STRUCTURED_MIN_HANDSHAKE_EPOCH,
            legacy_min_handshake_epoch: epochs::LEGACY_MIN_HANDSHAKE_EPOCH,
            legacy_mode_prefix: marker::MODE_PREFIX.to_vec(),
            legacy_mode_terminator: marker::MODE_TERMINATOR,
            expected_session_id: None,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration bound to a pre-shared session identity
    pub fn with_expected_session_id(session_id: u64) -> Self {
        Self {
            expected_session_id: Some(session_id),
            ..Self::default()
        }
    }

    /// Create a configuration where legacy frames obey the structured minimum
    pub fn strict() -> Self {
        Self {
            legacy_min_handshake_epoch: epochs::STRUCTURED_MIN_HANDSHAKE_EPOCH,
            ..Self::default()
        }
    }

    /// Handshake epoch minimum for the given encoding
    pub fn min_handshake_epoch(&self, encoding: FrameEncoding) -> u64 {
        match encoding {
            FrameEncoding::Structured => self.structured_min_handshake_epoch,
            FrameEncoding::Legacy => self.legacy_min_handshake_epoch,
        }
    }
}
