/*!
Session engine for the QSP session guard.

This module provides the state machine that validates every frame against
the session's invariants, applies the transition and re-derives the key
material. Every rejection closes the session before the violation is handed
back to the caller.
*/

use bytes::Bytes;
use log::{debug, info, warn};

use crate::core::{
    config::SessionConfig,
    error::{Result, Violation},
    message::{
        adapter::{normalize, LegacyFrame, RawFrame, StructuredRecord},
        frame::{Accepted, Frame},
        types::{FrameType, TransitionKind},
        value::Value,
    },
};
use crate::violation;

use super::key_chain::KeyChain;
use super::state::{EpochCounter, EpochStep, SessionState, StateManager};

/// Fail-closed session engine
///
/// Owns all mutable session state. The only ways to change it are
/// [`accept_frame`](Self::accept_frame), the `ingest*` family and
/// [`advance_epoch`](Self::advance_epoch).
#[derive(Debug, Clone)]
pub struct SessionEngine {
    /// Construction-time settings
    config: SessionConfig,

    /// Handshake and close latches
    state_manager: StateManager,

    // Identity and mode, both set once at handshake
    session_id: Option<u64>,
    mode: Option<String>,

    /// Strict epoch counter
    epoch: EpochCounter,

    /// Key-material chain
    key_chain: KeyChain,

    // Audit trail
    close_reason: Option<Violation>,
    transitions: u64,
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEngine {
    /// Create a new session with the default configuration
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a new session that only accepts a handshake for `session_id`
    pub fn with_expected_session_id(session_id: u64) -> Self {
        Self::with_config(SessionConfig::with_expected_session_id(session_id))
    }

    /// Create a new session with a specific configuration
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            state_manager: StateManager::new(),
            session_id: None,
            mode: None,
            epoch: EpochCounter::new(),
            key_chain: KeyChain::new(),
            close_reason: None,
            transitions: 0,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        self.state_manager.state()
    }

    /// Check if the session is closed
    pub fn is_closed(&self) -> bool {
        self.state_manager.is_closed()
    }

    /// Check if the handshake has completed
    pub fn is_handshake_complete(&self) -> bool {
        self.state_manager.is_handshake_complete()
    }

    /// Established session identity
    pub fn session_id(&self) -> Option<u64> {
        self.session_id
    }

    /// Pre-shared identity constraint
    pub fn expected_session_id(&self) -> Option<u64> {
        self.config.expected_session_id
    }

    /// Current epoch
    pub fn epoch(&self) -> u64 {
        self.epoch.current()
    }

    /// Mode pinned at handshake
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// Hex fingerprint of the current key material
    pub fn fingerprint(&self) -> String {
        self.key_chain.fingerprint()
    }

    /// The violation that closed this session
    pub fn close_reason(&self) -> Option<&Violation> {
        self.close_reason.as_ref()
    }

    /// Number of accepted transitions, local epoch advances included
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Validate and apply a canonical frame
    pub fn accept_frame(&mut self, frame: Frame) -> Result<Accepted> {
        if self.is_closed() {
            return violation!(SessionClosed, frame.frame_type);
        }

        self.apply(frame).map_err(|violation| self.fail(violation))
    }

    /// Normalize a raw frame in either encoding, then accept it
    pub fn ingest(&mut self, raw: &RawFrame) -> Result<Accepted> {
        if self.is_closed() {
            return violation!(SessionClosed, "{} frame", raw.encoding());
        }

        let frame = normalize(raw, &self.config).map_err(|violation| self.fail(violation))?;
        self.accept_frame(frame)
    }

    /// Accept a structured record
    pub fn ingest_structured(&mut self, record: StructuredRecord) -> Result<Accepted> {
        self.ingest(&RawFrame::Structured(record))
    }

    /// Accept a legacy positional frame
    pub fn ingest_legacy<T, P, S, E>(
        &mut self,
        tag: T,
        payload: P,
        claimed_session_id: S,
        claimed_epoch: E,
    ) -> Result<Accepted>
    where
        T: Into<Value>,
        P: Into<Value>,
        S: Into<Value>,
        E: Into<Value>,
    {
        let legacy = LegacyFrame::new(tag, payload, claimed_session_id, claimed_epoch);
        self.ingest(&RawFrame::Legacy(legacy))
    }

    /// Move the epoch forward by one outside of a REKEY frame
    pub fn advance_epoch(&mut self) -> Result<u64> {
        if self.is_closed() {
            return violation!(SessionClosed, "advance_epoch");
        }
        if !self.state_manager.can_transfer_data() {
            return Err(self.fail(Violation::BeforeHandshake("advance_epoch".into())));
        }

        let epoch = match self.epoch.advance() {
            Ok(epoch) => epoch,
            Err(step) => return Err(self.fail(bad_rekey_epoch(step))),
        };

        self.key_chain.advance(epoch);
        self.transitions += 1;
        debug!("session {:?} advanced locally to epoch {}", self.session_id, epoch);

        Ok(epoch)
    }

    /// Close the session and hand the violation back
    fn fail(&mut self, violation: Violation) -> Violation {
        self.state_manager.transition_to_closed();
        warn!(
            "session {:?} closed at epoch {}: {}",
            self.session_id,
            self.epoch.current(),
            violation
        );
        if self.close_reason.is_none() {
            self.close_reason = Some(violation.clone());
        }
        violation
    }

    fn apply(&mut self, frame: Frame) -> Result<Accepted> {
        match frame.frame_type {
            FrameType::Handshake => self.handshake(frame),
            FrameType::Rekey => self.rekey(frame),
            FrameType::AppData => self.app_data(frame),
            FrameType::Unknown(tag) => violation!(UnknownFrameType, tag),
        }
    }

    fn handshake(&mut self, frame: Frame) -> Result<Accepted> {
        if self.state_manager.is_handshake_complete() {
            return violation!(DuplicateHandshake);
        }

        let min = self.config.min_handshake_epoch(frame.encoding);
        if frame.claimed_epoch < min {
            return Err(Violation::HandshakeEpochTooLow {
                min,
                got: frame.claimed_epoch,
            });
        }

        if let Some(expected) = self.config.expected_session_id {
            if frame.claimed_session_id != expected {
                return Err(Violation::SessionMismatch {
                    local: expected,
                    got: frame.claimed_session_id,
                });
            }
        }

        let mode = match frame.claimed_mode {
            Some(mode) if mode.is_empty() => return violation!(InvalidMode, "empty mode"),
            Some(mode) => mode,
            None => self.config.default_mode.clone(),
        };

        self.key_chain.seed(frame.claimed_session_id, frame.claimed_epoch, &mode);
        self.epoch = EpochCounter::starting_at(frame.claimed_epoch);
        self.session_id = Some(frame.claimed_session_id);
        self.state_manager.transition_to_established();
        info!(
            "session {} established at epoch {} with mode {}",
            frame.claimed_session_id, frame.claimed_epoch, mode
        );
        self.mode = Some(mode);

        Ok(self.accepted(TransitionKind::Handshake, frame.claimed_session_id, frame.payload))
    }

    fn rekey(&mut self, frame: Frame) -> Result<Accepted> {
        let session_id = self.check_bound(&frame)?;

        self.epoch.set(frame.claimed_epoch).map_err(bad_rekey_epoch)?;

        let epoch = self.epoch.current();
        self.key_chain.rekey(epoch, &frame.payload);
        debug!("session {} rekeyed to epoch {}", session_id, epoch);

        Ok(self.accepted(TransitionKind::Rekey, session_id, frame.payload))
    }

    fn app_data(&mut self, frame: Frame) -> Result<Accepted> {
        let session_id = self.check_bound(&frame)?;

        let local = self.epoch.current();
        if frame.claimed_epoch != local {
            return Err(Violation::EpochMismatch {
                local,
                got: frame.claimed_epoch,
            });
        }

        self.key_chain.app_data(local, &frame.payload);
        debug!(
            "session {} accepted {} bytes at epoch {}",
            session_id,
            frame.payload.len(),
            local
        );

        Ok(self.accepted(TransitionKind::AppData, session_id, frame.payload))
    }

    /// Guards shared by every post-handshake frame: handshake, identity, mode
    fn check_bound(&self, frame: &Frame) -> Result<u64> {
        let session_id = match (self.state_manager.can_transfer_data(), self.session_id) {
            (true, Some(session_id)) => session_id,
            _ => return violation!(BeforeHandshake, frame.frame_type),
        };

        if frame.claimed_session_id != session_id {
            return Err(Violation::SessionMismatch {
                local: session_id,
                got: frame.claimed_session_id,
            });
        }

        if let (Some(claimed), Some(pinned)) = (&frame.claimed_mode, &self.mode) {
            if claimed != pinned {
                return Err(Violation::DowngradeDetected {
                    pinned: pinned.clone(),
                    got: claimed.clone(),
                });
            }
        }

        Ok(session_id)
    }

    fn accepted(&mut self, kind: TransitionKind, session_id: u64, payload: Bytes) -> Accepted {
        self.transitions += 1;
        Accepted {
            kind,
            epoch: self.epoch.current(),
            session_id,
            fingerprint: self.key_chain.fingerprint(),
            payload,
        }
    }
}

fn bad_rekey_epoch(step: EpochStep) -> Violation {
    Violation::BadRekeyEpoch {
        current: step.current,
        got: step.attempted,
        expected: step.expected,
    }
}
