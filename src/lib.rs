/*!
# QSP Session Guard

A fail-closed session protocol enforcement core. It sits behind the wire
codec and in front of the application, and decides for every frame whether
the session may proceed.

## Overview

This library provides:

- Handshake gating: no REKEY or APP_DATA before a completed HANDSHAKE
- Strict epoch monotonicity: REKEY must claim exactly `epoch + 1`,
  APP_DATA exactly `epoch`
- Identity binding: every frame must claim the established session id
- Downgrade detection: the security mode pinned at handshake never changes
- Two accepted boundary encodings (structured records and legacy positional
  frames) normalized into one canonical frame
- A deterministic key-material fingerprint chain for audit

## Fail-closed

Any violation closes the session permanently. The caller sees an
`Err(Violation)`, and every later call on that session fails as well.
Build a new session to continue.

```
use qsp_guard::{Frame, QspSession};

let mut session = QspSession::new();
session.accept_frame(Frame::handshake(777, 1)).unwrap();

let err = session.accept_frame(Frame::rekey(777, 3)).unwrap_err();
assert_eq!(err.reason(), "bad rekey epoch");
assert!(session.is_closed());
```

The key-material chain is a placeholder fingerprint, not a key derivation
function.
*/

// Core protocol components
pub mod core;

// Protocol entry points
pub mod protocol;

// Serialization support (optional)
#[cfg(feature = "serde-support")]
pub mod serde;

// Re-export commonly used types for convenience
pub use crate::core::error::{Violation, Result};
pub use crate::core::message::{
    Accepted, Frame, FrameType, LegacyFrame, RawFrame, StructuredRecord, TransitionKind, Value,
};
pub use crate::core::session::{QspSession, SessionEngine, SessionState, SharedSession, EpochCounter};
pub use crate::core::config::{SessionConfig, FrameEncoding};
pub use crate::core::constants::DEFAULT_MODE;

// Re-export protocol builder
pub use protocol::builder::{SessionBuilder, session};
