/*!
Serialization support for the QSP session guard.

This module provides serializable mirrors of the boundary records and
session outcomes, so structured frames can be decoded from any Serde format
and results can be written to audit logs. It's only built when the
`serde-support` feature is enabled.
*/

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::core::{
    message::{Accepted, StructuredRecord, TransitionKind, Value},
    session::SessionState,
};

/// Serializable version of a boundary Value
///
/// Untagged, so a JSON string becomes `Text`, a number becomes `Integer` or
/// `Float`, an array of small integers becomes `Bytes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerdeValue {
    /// Null
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Integer above `i64::MAX`
    Unsigned(u64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl From<SerdeValue> for Value {
    fn from(value: SerdeValue) -> Self {
        match value {
            SerdeValue::Null => Value::Null,
            SerdeValue::Bool(b) => Value::Bool(b),
            SerdeValue::Integer(n) => Value::Integer(n as i128),
            SerdeValue::Unsigned(n) => Value::Integer(n as i128),
            SerdeValue::Float(f) => Value::Float(f),
            SerdeValue::Text(s) => Value::Text(s),
            SerdeValue::Bytes(b) => Value::Bytes(Bytes::from(b)),
        }
    }
}

/// Serializable version of a structured record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerdeStructuredRecord {
    /// Frame type tag
    #[serde(rename = "type", default)]
    pub frame_type: SerdeValue,
    /// Claimed session id
    #[serde(default)]
    pub session_id: SerdeValue,
    /// Claimed epoch
    #[serde(default)]
    pub epoch: SerdeValue,
    /// Claimed mode
    #[serde(default)]
    pub mode: SerdeValue,
    /// Payload
    #[serde(default)]
    pub payload: SerdeValue,
}

impl From<SerdeStructuredRecord> for StructuredRecord {
    fn from(record: SerdeStructuredRecord) -> Self {
        Self {
            frame_type: record.frame_type.into(),
            session_id: record.session_id.into(),
            epoch: record.epoch.into(),
            mode: record.mode.into(),
            payload: record.payload.into(),
        }
    }
}

/// Serializable version of SessionState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerdeSessionState {
    /// No handshake yet
    Init,
    /// Handshake complete
    Established,
    /// Terminal
    Closed,
}

impl From<SessionState> for SerdeSessionState {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Init => SerdeSessionState::Init,
            SessionState::Established => SerdeSessionState::Established,
            SessionState::Closed => SerdeSessionState::Closed,
        }
    }
}

impl From<SerdeSessionState> for SessionState {
    fn from(state: SerdeSessionState) -> Self {
        match state {
            SerdeSessionState::Init => SessionState::Init,
            SerdeSessionState::Established => SessionState::Established,
            SerdeSessionState::Closed => SessionState::Closed,
        }
    }
}

/// Accepted transition for audit output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerdeAccepted {
    /// Always true
    pub success: bool,
    /// `handshake`, `rekey` or `app-data`
    pub category: String,
    /// Epoch after the transition
    pub epoch: u64,
    /// Session identity
    pub session_id: u64,
    /// Hex key-material fingerprint
    pub fingerprint: String,
}

impl From<&Accepted> for SerdeAccepted {
    fn from(accepted: &Accepted) -> Self {
        Self {
            success: accepted.ok(),
            category: accepted.kind.as_str().to_string(),
            epoch: accepted.epoch,
            session_id: accepted.session_id,
            fingerprint: accepted.fingerprint.clone(),
        }
    }
}

impl SerdeAccepted {
    /// Parse the category back into a TransitionKind
    pub fn kind(&self) -> Option<TransitionKind> {
        match self.category.as_str() {
            "handshake" => Some(TransitionKind::Handshake),
            "rekey" => Some(TransitionKind::Rekey),
            "app-data" => Some(TransitionKind::AppData),
            _ => None,
        }
    }
}

/// Serializes a value to JSON
#[cfg(feature = "serde_json")]
pub fn serialize_to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Deserializes a value from JSON
#[cfg(feature = "serde_json")]
pub fn deserialize_from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}
