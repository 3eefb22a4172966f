/*!
Frame ingestion adapter.

Two boundary encodings are accepted:

- **structured**: a keyed record with `type`, `session_id`, `epoch`,
  optional `mode` and `payload`.
- **legacy positional**: a type tag and payload, with the claimed session id
  and epoch passed alongside. A mode claim may ride at the front of the
  payload as `MODE=<mode>;`, which is stripped before the payload reaches the
  engine.

Both normalize into the same canonical [`Frame`]. Any malformed field is
reported as a validation violation before a protocol guard ever runs.
*/

use bytes::Bytes;
use log::trace;

use crate::core::{
    config::{FrameEncoding, SessionConfig},
    error::Result,
    message::{frame::Frame, types::FrameType, value::Value},
};
use crate::violation;

/// Structured boundary record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredRecord {
    /// Frame type tag
    pub frame_type: Value,
    /// Claimed session id
    pub session_id: Value,
    /// Claimed epoch
    pub epoch: Value,
    /// Claimed mode, `Value::Null` when absent
    pub mode: Value,
    /// Payload, `Value::Null` when absent
    pub payload: Value,
}

impl StructuredRecord {
    /// Create a new record with no mode and no payload
    pub fn new<T, S, E>(frame_type: T, session_id: S, epoch: E) -> Self
    where
        T: Into<Value>,
        S: Into<Value>,
        E: Into<Value>,
    {
        Self {
            frame_type: frame_type.into(),
            session_id: session_id.into(),
            epoch: epoch.into(),
            mode: Value::Null,
            payload: Value::Null,
        }
    }

    /// Set the mode field
    pub fn with_mode<M: Into<Value>>(mut self, mode: M) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set the payload field
    pub fn with_payload<P: Into<Value>>(mut self, payload: P) -> Self {
        self.payload = payload.into();
        self
    }
}

/// Legacy positional frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyFrame {
    /// Frame type tag
    pub tag: Value,
    /// Payload, possibly carrying a mode marker
    pub payload: Value,
    /// Claimed session id
    pub claimed_session_id: Value,
    /// Claimed epoch
    pub claimed_epoch: Value,
}

impl LegacyFrame {
    /// Create a new legacy frame
    pub fn new<T, P, S, E>(tag: T, payload: P, claimed_session_id: S, claimed_epoch: E) -> Self
    where
        T: Into<Value>,
        P: Into<Value>,
        S: Into<Value>,
        E: Into<Value>,
    {
        Self {
            tag: tag.into(),
            payload: payload.into(),
            claimed_session_id: claimed_session_id.into(),
            claimed_epoch: claimed_epoch.into(),
        }
    }
}

/// Raw boundary input in either accepted encoding
#[derive(Debug, Clone, PartialEq)]
pub enum RawFrame {
    /// Keyed record
    Structured(StructuredRecord),
    /// Positional tag and payload
    Legacy(LegacyFrame),
}

impl RawFrame {
    /// Encoding of this raw frame
    pub fn encoding(&self) -> FrameEncoding {
        match self {
            RawFrame::Structured(_) => FrameEncoding::Structured,
            RawFrame::Legacy(_) => FrameEncoding::Legacy,
        }
    }
}

impl From<StructuredRecord> for RawFrame {
    fn from(record: StructuredRecord) -> Self {
        RawFrame::Structured(record)
    }
}

impl From<LegacyFrame> for RawFrame {
    fn from(frame: LegacyFrame) -> Self {
        RawFrame::Legacy(frame)
    }
}

/// Normalize a raw frame into the canonical [`Frame`]
pub fn normalize(raw: &RawFrame, config: &SessionConfig) -> Result<Frame> {
    let frame = match raw {
        RawFrame::Structured(record) => normalize_structured(record)?,
        RawFrame::Legacy(legacy) => normalize_legacy(legacy, config)?,
    };

    trace!(
        "normalized {} frame: type={} sid={} epoch={} mode={:?} payload_len={}",
        frame.encoding,
        frame.frame_type,
        frame.claimed_session_id,
        frame.claimed_epoch,
        frame.claimed_mode,
        frame.payload.len()
    );

    Ok(frame)
}

fn normalize_structured(record: &StructuredRecord) -> Result<Frame> {
    let frame_type = frame_type(&record.frame_type)?;
    let claimed_session_id = unsigned("session_id", &record.session_id)?;
    let claimed_epoch = unsigned("epoch", &record.epoch)?;
    let claimed_mode = match &record.mode {
        Value::Null => None,
        value => Some(mode(value)?),
    };
    let payload = payload(&record.payload)?;

    Ok(Frame {
        frame_type,
        claimed_session_id,
        claimed_epoch,
        claimed_mode,
        payload,
        encoding: FrameEncoding::Structured,
    })
}

fn normalize_legacy(legacy: &LegacyFrame, config: &SessionConfig) -> Result<Frame> {
    let frame_type = frame_type(&legacy.tag)?;
    let claimed_session_id = unsigned("session_id", &legacy.claimed_session_id)?;
    let claimed_epoch = unsigned("epoch", &legacy.claimed_epoch)?;
    let raw_payload = payload(&legacy.payload)?;
    let (claimed_mode, payload) = split_mode_marker(raw_payload, config)?;

    Ok(Frame {
        frame_type,
        claimed_session_id,
        claimed_epoch,
        claimed_mode,
        payload,
        encoding: FrameEncoding::Legacy,
    })
}

fn frame_type(value: &Value) -> Result<FrameType> {
    match value {
        Value::Text(tag) => Ok(FrameType::from_tag(tag)),
        other => violation!(InvalidFrameType, "expected text, got {}", other.kind()),
    }
}

fn unsigned(field: &str, value: &Value) -> Result<u64> {
    match value {
        Value::Integer(n) => match u64::try_from(*n) {
            Ok(v) => Ok(v),
            Err(_) => violation!(InvalidEncoding, "{} out of range: {}", field, n),
        },
        other => violation!(InvalidEncoding, "{} expected integer, got {}", field, other.kind()),
    }
}

fn mode(value: &Value) -> Result<String> {
    match value {
        Value::Text(mode) if !mode.is_empty() => Ok(mode.clone()),
        Value::Text(_) => violation!(InvalidMode, "empty mode"),
        other => violation!(InvalidMode, "expected text, got {}", other.kind()),
    }
}

fn payload(value: &Value) -> Result<Bytes> {
    match value {
        Value::Null => Ok(Bytes::new()),
        Value::Bytes(bytes) => Ok(bytes.clone()),
        Value::Text(text) => Ok(Bytes::copy_from_slice(text.as_bytes())),
        other => violation!(InvalidPayload, "expected bytes, got {}", other.kind()),
    }
}

/// Split a legacy payload into an optional mode claim and the remaining payload
fn split_mode_marker(payload: Bytes, config: &SessionConfig) -> Result<(Option<String>, Bytes)> {
    let prefix = config.legacy_mode_prefix.as_slice();
    if prefix.is_empty() || !payload.starts_with(prefix) {
        return Ok((None, payload));
    }

    let claim = &payload[prefix.len()..];
    let end = match claim.iter().position(|b| *b == config.legacy_mode_terminator) {
        Some(end) => end,
        None => return violation!(InvalidMode, "unterminated mode marker"),
    };

    let mode = match std::str::from_utf8(&claim[..end]) {
        Ok(mode) if !mode.is_empty() => mode.to_string(),
        Ok(_) => return violation!(InvalidMode, "empty mode marker"),
        Err(_) => return violation!(InvalidMode, "mode marker is not UTF-8"),
    };

    let rest = payload.slice(prefix.len() + end + 1..);
    Ok((Some(mode), rest))
}
