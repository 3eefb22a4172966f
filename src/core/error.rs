/*!
Fail-closed violations for the QSP session guard.

Every rejected operation produces a `Violation`. There is exactly one error
kind and it is always terminal: by the time a caller observes a `Violation`
the session that produced it has already been closed.
*/

use std::io;
use thiserror::Error;

/// Result type for the QSP session guard
pub type Result<T> = std::result::Result<T, Violation>;

/// Protocol violation. Each variant closes the session that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Frame type missing or not a string
    #[error("invalid frame type: {0}")]
    InvalidFrameType(String),

    /// Claimed session id or epoch missing, negative or not an integer
    #[error("invalid session_id/epoch encoding: {0}")]
    InvalidEncoding(String),

    /// Payload is not a byte sequence
    #[error("invalid payload encoding: {0}")]
    InvalidPayload(String),

    /// Mode claim is not a non-empty string
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// A second handshake on the same session
    #[error("duplicate handshake")]
    DuplicateHandshake,

    /// Handshake epoch below the minimum for its encoding
    #[error("handshake epoch below minimum: min={min} got={got}")]
    HandshakeEpochTooLow {
        min: u64,
        got: u64,
    },

    /// Claimed identity differs from the established or expected one
    #[error("session mismatch: local={local} got={got}")]
    SessionMismatch {
        local: u64,
        got: u64,
    },

    /// Rekey epoch is not exactly current + 1, or no next epoch exists
    #[error("bad rekey epoch: current={current} got={got} expected={}", next_epoch(.expected))]
    BadRekeyEpoch {
        current: u64,
        got: u64,
        expected: Option<u64>,
    },

    /// Application data epoch is not exactly the current epoch
    #[error("epoch mismatch: local={local} got={got}")]
    EpochMismatch {
        local: u64,
        got: u64,
    },

    /// Claimed mode differs from the mode pinned at handshake
    #[error("downgrade detected: pinned={pinned} got={got}")]
    DowngradeDetected {
        pinned: String,
        got: String,
    },

    /// Frame or epoch advance before the handshake completed
    #[error("frame before handshake: {0} rejected")]
    BeforeHandshake(String),

    /// Any operation on a closed session
    #[error("session closed: {0} rejected")]
    SessionClosed(String),

    /// Frame type string is not a known tag
    #[error("unknown frame type: {0:?}")]
    UnknownFrameType(String),
}

fn next_epoch(expected: &Option<u64>) -> String {
    match expected {
        Some(epoch) => epoch.to_string(),
        None => "none (epoch space exhausted)".to_string(),
    }
}

impl Violation {
    /// Stable reason phrase, independent of the context carried by the variant
    pub fn reason(&self) -> &'static str {
        match self {
            Violation::InvalidFrameType(_) => "invalid frame type",
            Violation::InvalidEncoding(_) => "invalid session_id/epoch encoding",
            Violation::InvalidPayload(_) => "invalid payload encoding",
            Violation::InvalidMode(_) => "invalid mode",
            Violation::DuplicateHandshake => "duplicate handshake",
            Violation::HandshakeEpochTooLow { .. } => "handshake epoch below minimum",
            Violation::SessionMismatch { .. } => "session mismatch",
            Violation::BadRekeyEpoch { .. } => "bad rekey epoch",
            Violation::EpochMismatch { .. } => "epoch mismatch",
            Violation::DowngradeDetected { .. } => "downgrade detected",
            Violation::BeforeHandshake(_) => "frame before handshake",
            Violation::SessionClosed(_) => "session closed",
            Violation::UnknownFrameType(_) => "unknown frame type",
        }
    }

    /// True for failures raised while normalizing boundary input,
    /// before any protocol guard ran
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Violation::InvalidFrameType(_)
                | Violation::InvalidEncoding(_)
                | Violation::InvalidPayload(_)
                | Violation::InvalidMode(_)
        )
    }
}

/// Build an `Err(Violation::..)` with a formatted context string
#[macro_export]
macro_rules! violation {
    ($variant:ident) => {
        Err($crate::core::error::Violation::$variant)
    };
    ($variant:ident, $fmt:expr) => {
        Err($crate::core::error::Violation::$variant($fmt.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        Err($crate::core::error::Violation::$variant(format!($fmt, $($arg)*)))
    };
}

/// Convert from Violation to io::Error (for transport callers)
impl From<Violation> for io::Error {
    fn from(violation: Violation) -> Self {
        let kind = match &violation {
            Violation::InvalidFrameType(_)
            | Violation::InvalidEncoding(_)
            | Violation::InvalidPayload(_)
            | Violation::InvalidMode(_)
            | Violation::UnknownFrameType(_) => io::ErrorKind::InvalidData,
            Violation::SessionMismatch { .. } | Violation::DowngradeDetected { .. } => {
                io::ErrorKind::PermissionDenied
            }
            Violation::BeforeHandshake(_) => io::ErrorKind::NotConnected,
            Violation::SessionClosed(_) => io::ErrorKind::ConnectionAborted,
            Violation::DuplicateHandshake
            | Violation::HandshakeEpochTooLow { .. }
            | Violation::BadRekeyEpoch { .. }
            | Violation::EpochMismatch { .. } => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_reason() {
        let cases = vec![
            Violation::InvalidFrameType("missing".into()),
            Violation::InvalidEncoding("epoch".into()),
            Violation::InvalidPayload("integer".into()),
            Violation::InvalidMode("empty".into()),
            Violation::DuplicateHandshake,
            Violation::HandshakeEpochTooLow { min: 1, got: 0 },
            Violation::SessionMismatch { local: 1, got: 2 },
            Violation::BadRekeyEpoch { current: 1, got: 3, expected: Some(2) },
            Violation::EpochMismatch { local: 2, got: 1 },
            Violation::DowngradeDetected { pinned: "PQC+QKD".into(), got: "PQC_ONLY".into() },
            Violation::BeforeHandshake("APP_DATA".into()),
            Violation::SessionClosed("REKEY".into()),
            Violation::UnknownFrameType("PING".into()),
        ];

        for violation in cases {
            let text = violation.to_string();
            assert!(text.contains(violation.reason()), "{text:?} lacks {:?}", violation.reason());
        }
    }

    #[test]
    fn test_bad_rekey_epoch_display() {
        let skip = Violation::BadRekeyEpoch { current: 1, got: 3, expected: Some(2) };
        assert_eq!(skip.to_string(), "bad rekey epoch: current=1 got=3 expected=2");

        let exhausted = Violation::BadRekeyEpoch { current: u64::MAX, got: u64::MAX, expected: None };
        assert!(exhausted.to_string().ends_with("expected=none (epoch space exhausted)"));
    }

    #[test]
    fn test_validation_failures() {
        assert!(Violation::InvalidMode("x".into()).is_validation_failure());
        assert!(Violation::InvalidEncoding("x".into()).is_validation_failure());
        assert!(!Violation::DuplicateHandshake.is_validation_failure());
        assert!(!Violation::UnknownFrameType("PING".into()).is_validation_failure());
    }

    #[test]
    fn test_violation_macro() {
        let err: Result<()> = violation!(BeforeHandshake, "APP_DATA");
        assert_eq!(err, Err(Violation::BeforeHandshake("APP_DATA".into())));

        let err: Result<()> = violation!(InvalidEncoding, "{} is negative", "epoch");
        assert_eq!(err.unwrap_err().to_string(), "invalid session_id/epoch encoding: epoch is negative");

        let err: Result<()> = violation!(DuplicateHandshake);
        assert_eq!(err, Err(Violation::DuplicateHandshake));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::from(Violation::SessionClosed("APP_DATA".into()));
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionAborted);
        assert!(io_err.to_string().contains("session closed"));

        let io_err = io::Error::from(Violation::DowngradeDetected {
            pinned: "PQC+QKD".into(),
            got: "PQC_ONLY".into(),
        });
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }
}
