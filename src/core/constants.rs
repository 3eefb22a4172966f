/*!
Constants for the QSP session guard.

This module contains the protocol constants: frame type tags, the default
security mode, per-encoding handshake minimums and the domain labels folded
into the key-material chain.
*/

/// Mode pinned at handshake when the handshake frame does not claim one
pub const DEFAULT_MODE: &str = "PQC_ONLY";

/// Frame type tags accepted at the boundary
pub mod tags {
    /// Canonical handshake tag
    pub const HANDSHAKE: &str = "HANDSHAKE";

    /// Handshake-completed tag used by the structured encoding
    pub const HANDSHAKE_DONE: &str = "HANDSHAKE_DONE";

    /// Short handshake tag used by the legacy encoding
    pub const HANDSHAKE_SHORT: &str = "HS";

    /// Rekey tag
    pub const REKEY: &str = "REKEY";

    /// Application data tag
    pub const APP_DATA: &str = "APP_DATA";
}

/// Minimum handshake epochs, one per boundary encoding
pub mod epochs {
    /// Structured records must open at epoch 1 or later
    pub const STRUCTURED_MIN_HANDSHAKE_EPOCH: u64 = 1;

    /// Legacy positional frames may open at epoch 0
    pub const LEGACY_MIN_HANDSHAKE_EPOCH: u64 = 0;
}

/// Legacy in-payload mode marker, `MODE=<mode>;<payload>`
pub mod marker {
    /// Prefix that opens a mode claim inside a legacy payload
    pub const MODE_PREFIX: &[u8] = b"MODE=";

    /// Byte that terminates the embedded mode claim
    pub const MODE_TERMINATOR: u8 = b';';
}

/// Domain labels for the key-material chain
pub mod labels {
    /// Handshake seed
    pub const HANDSHAKE: &[u8] = b"hs";

    /// Rekey step
    pub const REKEY: &[u8] = b"rekey";

    /// Application data step
    pub const APP_DATA: &[u8] = b"app";

    /// Local epoch advance
    pub const ADVANCE: &[u8] = b"advance";
}

/// Size of the key-material chain value (SHA-256 output)
pub const KEY_MATERIAL_SIZE: usize = 32;
