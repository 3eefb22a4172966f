/*!
Session management for the QSP session guard.

This module provides the session state latches, the strict epoch counter,
the key-material chain, the fail-closed engine and a lock-protected handle
for sessions shared across threads.
*/

// State management
pub mod state;

// Key-material chain
pub mod key_chain;

// Session engine
pub mod engine;

// Thread-shared handle
pub mod shared;

// Re-export main session types
pub use self::state::{SessionState, StateManager, EpochCounter, EpochStep};
pub use self::key_chain::KeyChain;
pub use self::engine::SessionEngine;
pub use self::shared::SharedSession;

// Define the public QspSession type (main API)
pub type QspSession = SessionEngine;
