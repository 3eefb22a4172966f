/*!
Session builder for the QSP session guard.

This module provides a builder pattern for creating sessions with a
specific configuration.
*/

use crate::core::{
    config::SessionConfig,
    session::{SessionEngine, SharedSession},
};

/// Builder for QSP sessions
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    /// Session configuration
    config: SessionConfig,
}

impl SessionBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Require the handshake to claim this session identity
    pub fn expect_session_id(mut self, session_id: u64) -> Self {
        self.config.expected_session_id = Some(session_id);
        self
    }

    /// Mode pinned when the handshake claims none
    pub fn with_default_mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.config.default_mode = mode.into();
        self
    }

    /// Minimum handshake epoch for structured records
    pub fn with_structured_min_epoch(mut self, epoch: u64) -> Self {
        self.config.structured_min_handshake_epoch = epoch;
        self
    }

    /// Minimum handshake epoch for legacy frames
    pub fn with_legacy_min_epoch(mut self, epoch: u64) -> Self {
        self.config.legacy_min_handshake_epoch = epoch;
        self
    }

    /// Marker that carries a mode claim in a legacy payload
    pub fn with_legacy_mode_marker<P: Into<Vec<u8>>>(mut self, prefix: P, terminator: u8) -> Self {
        self.config.legacy_mode_prefix = prefix.into();
        self.config.legacy_mode_terminator = terminator;
        self
    }

    /// Hold legacy handshakes to the structured minimum epoch
    pub fn strict(mut self) -> Self {
        self.config.legacy_min_handshake_epoch = self.config.structured_min_handshake_epoch;
        self
    }

    /// Get the configuration built so far
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Build a session engine
    pub fn build(self) -> SessionEngine {
        SessionEngine::with_config(self.config)
    }

    /// Build a lock-protected session handle
    pub fn build_shared(self) -> SharedSession {
        SharedSession::new(self.build())
    }
}

/// Create a session engine with default configuration
pub fn session() -> SessionEngine {
    SessionBuilder::new().build()
}
