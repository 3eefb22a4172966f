/*!
Canonical frame and transition result.

A `Frame` is what the session engine consumes, regardless of which boundary
encoding it came from. An `Accepted` is what the engine hands back for every
transition it allows.
*/

use bytes::Bytes;

use crate::core::{
    config::FrameEncoding,
    message::types::{FrameType, TransitionKind},
};

/// Canonical, already-validated frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame type
    pub frame_type: FrameType,
    /// Identity the sender claims
    pub claimed_session_id: u64,
    /// Epoch the sender claims
    pub claimed_epoch: u64,
    /// Security mode the sender claims, if any
    pub claimed_mode: Option<String>,
    /// Frame payload
    pub payload: Bytes,
    /// Encoding this frame was normalized from
    pub encoding: FrameEncoding,
}

impl Frame {
    /// Create a new structured-encoding frame with no mode claim and an empty payload
    pub fn new(frame_type: FrameType, claimed_session_id: u64, claimed_epoch: u64) -> Self {
        Self {
            frame_type,
            claimed_session_id,
            claimed_epoch,
            claimed_mode: None,
            payload: Bytes::new(),
            encoding: FrameEncoding::Structured,
        }
    }

    /// Handshake frame
    pub fn handshake(session_id: u64, epoch: u64) -> Self {
        Self::new(FrameType::Handshake, session_id, epoch)
    }

    /// Rekey frame
    pub fn rekey(session_id: u64, epoch: u64) -> Self {
        Self::new(FrameType::Rekey, session_id, epoch)
    }

    /// Application data frame
    pub fn app_data(session_id: u64, epoch: u64) -> Self {
        Self::new(FrameType::AppData, session_id, epoch)
    }

    /// Set the mode claim
    pub fn with_mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.claimed_mode = Some(mode.into());
        self
    }

    /// Set the payload
    pub fn with_payload<B: Into<Bytes>>(mut self, payload: B) -> Self {
        self.payload = payload.into();
        self
    }

    /// Set the encoding
    pub fn with_encoding(mut self, encoding: FrameEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Outcome of an accepted transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    /// Transition category
    pub kind: TransitionKind,
    /// Epoch after the transition
    pub epoch: u64,
    /// Established session identity
    pub session_id: u64,
    /// Hex fingerprint of the key material after the transition
    pub fingerprint: String,
    /// Payload carried by the accepted frame
    pub payload: Bytes,
}

impl Accepted {
    /// Always true; rejected transitions never produce an `Accepted`
    pub fn ok(&self) -> bool {
        true
    }
}
