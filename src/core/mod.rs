//! Core components for the QSP session guard.
//!
//! This module contains the fundamental building blocks: frames and the
//! ingestion adapter, the session engine, configuration and violations.

// Frame handling
pub mod message;

// Session management
pub mod session;

// Session configuration
pub mod config;

// Protocol constants
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{Violation, Result};
pub use self::message::{Frame, FrameType, Accepted, TransitionKind};
pub use self::session::{SessionState, SessionEngine};
pub use self::config::{SessionConfig, FrameEncoding};
