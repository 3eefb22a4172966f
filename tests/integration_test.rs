// tests/integration_test.rs
use qsp_guard::{
    Frame,
    QspSession,
    SessionState,
    TransitionKind,
    Value,
    Violation,
    Result,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_reject_epoch_jump() -> Result<()> {
    init_logging();
    let mut session = QspSession::new();

    let accepted = session.accept_frame(Frame::handshake(777, 1))?;
    assert!(accepted.ok());
    assert_eq!(accepted.epoch, 1);

    // Attacker tries to jump to epoch 3 (only 2 is allowed)
    let err = session
        .accept_frame(Frame::rekey(777, 3).with_payload(&b"evil"[..]))
        .unwrap_err();
    assert!(err.to_string().contains("bad rekey epoch"));
    assert_eq!(session.state(), SessionState::Closed);

    Ok(())
}

#[test]
fn test_reject_epoch_rollback_on_app_data() -> Result<()> {
    init_logging();
    let mut session = QspSession::new();
    session.accept_frame(Frame::handshake(888, 1))?;

    let accepted = session.accept_frame(Frame::rekey(888, 2).with_payload(&b"ok"[..]))?;
    assert_eq!(accepted.epoch, 2);

    // Stale epoch after a legal rekey
    let err = session
        .accept_frame(Frame::app_data(888, 1).with_payload(&b"msg"[..]))
        .unwrap_err();
    assert!(err.to_string().contains("epoch mismatch"));
    assert!(session.is_closed());

    Ok(())
}

#[test]
fn test_detect_downgrade_on_rekey_mode_change() -> Result<()> {
    init_logging();
    let mut session = QspSession::new();
    session.accept_frame(Frame::handshake(6060, 1).with_mode("PQC+QKD"))?;

    let err = session
        .accept_frame(Frame::rekey(6060, 2).with_mode("PQC_ONLY").with_payload(&b"x"[..]))
        .unwrap_err();
    assert!(err.to_string().contains("downgrade detected"));
    assert!(session.is_closed());

    Ok(())
}

#[test]
fn test_allow_same_mode_after_handshake() -> Result<()> {
    init_logging();
    let mut session = QspSession::new();
    session.accept_frame(Frame::handshake(6061, 1).with_mode("PQC+QKD"))?;

    let accepted = session.accept_frame(Frame::rekey(6061, 2).with_mode("PQC+QKD").with_payload(&b"ok"[..]))?;
    assert!(accepted.ok());
    assert_eq!(accepted.epoch, 2);
    assert_eq!(accepted.kind, TransitionKind::Rekey);

    Ok(())
}

#[test]
fn test_close_on_epoch_mismatch_after_advance() -> Result<()> {
    init_logging();
    let mut session = QspSession::with_expected_session_id(123);

    session.ingest_legacy("HS", Value::Null, 123u64, 0u64)?;

    let accepted = session.ingest_legacy("APP_DATA", b"hello", 123u64, 0u64)?;
    assert_eq!(&accepted.payload[..], b"hello");
    assert_eq!(accepted.kind, TransitionKind::AppData);

    assert_eq!(session.advance_epoch()?, 1);
    assert_eq!(session.epoch(), 1);

    let err = session.ingest_legacy("APP_DATA", b"x", 123u64, 0u64).unwrap_err();
    assert_eq!(err.reason(), "epoch mismatch");
    assert!(session.is_closed());

    Ok(())
}

#[test]
fn test_reject_appdata_before_handshake() {
    init_logging();
    let mut session = QspSession::new();

    let err = session
        .accept_frame(Frame::app_data(1, 0).with_payload(&b"hello"[..]))
        .unwrap_err();
    assert!(matches!(err, Violation::BeforeHandshake(_)));
    assert!(session.is_closed());
}

#[test]
fn test_close_on_wrong_session_id() {
    init_logging();
    let mut session = QspSession::with_expected_session_id(123);

    let err = session.ingest_legacy("HS", Value::Null, 999u64, 0u64).unwrap_err();
    assert_eq!(err.reason(), "session mismatch");
    assert!(session.is_closed());
}

#[test]
fn test_handshake_success() -> Result<()> {
    init_logging();
    let mut session = QspSession::with_expected_session_id(1);

    let accepted = session.ingest_legacy("HS", Value::Null, 1u64, 0u64)?;
    assert_eq!(accepted.kind, TransitionKind::Handshake);
    assert_eq!(accepted.session_id, 1);
    assert_eq!(accepted.epoch, 0);
    assert!(session.is_handshake_complete());
    assert_eq!(session.state(), SessionState::Established);

    Ok(())
}

#[test]
fn test_normal_data_flow() -> Result<()> {
    init_logging();
    let mut session = QspSession::with_expected_session_id(123);
    session.ingest_legacy("HS", Value::Null, 123u64, 0u64)?;

    let messages: [&[u8]; 3] = [b"one", b"two", b"three"];
    for message in messages {
        let accepted = session.ingest_legacy("APP_DATA", message, 123u64, 0u64)?;
        assert_eq!(&accepted.payload[..], message);
    }

    let accepted = session.accept_frame(Frame::rekey(123, 1))?;
    assert_eq!(accepted.epoch, 1);
    session.accept_frame(Frame::app_data(123, 1))?;
    assert_eq!(session.transitions(), 6);

    Ok(())
}

#[test]
fn test_nothing_succeeds_after_close() {
    init_logging();
    let mut session = QspSession::new();
    session.accept_frame(Frame::handshake(5, 1)).unwrap();
    session.accept_frame(Frame::app_data(6, 1)).unwrap_err();

    let attempts = vec![
        Frame::handshake(5, 1),
        Frame::rekey(5, 2),
        Frame::app_data(5, 1),
        Frame::app_data(6, 1),
    ];
    for frame in attempts {
        let err = session.accept_frame(frame).unwrap_err();
        assert_eq!(err.reason(), "session closed");
    }
    assert!(session.advance_epoch().is_err());
    assert_eq!(session.close_reason().map(|v| v.reason()), Some("session mismatch"));
}

#[test]
fn test_violation_into_io_error() {
    let mut session = QspSession::new();
    let err = session.accept_frame(Frame::app_data(1, 0)).unwrap_err();
    let io_err: std::io::Error = err.into();
    assert_eq!(io_err.kind(), std::io::ErrorKind::NotConnected);
}
