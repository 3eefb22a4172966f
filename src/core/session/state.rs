/*!
Session state management for the QSP session guard.

This module defines the three session states, the one-way latches that
drive them and the strict epoch counter.
*/

use std::fmt;

/// Session state for tracking connection progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// No handshake yet
    Init,
    /// Handshake complete, frames accepted
    Established,
    /// Terminal; every operation fails
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Init => write!(f, "Init"),
            SessionState::Established => write!(f, "Established"),
            SessionState::Closed => write!(f, "Closed"),
        }
    }
}

/// Session state manager
///
/// Holds the `handshake_complete` and `closed` latches. Neither can be
/// reset once set, and the state is derived from them rather than stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateManager {
    handshake_complete: bool,
    closed: bool,
}

impl StateManager {
    /// Create a new state manager in `Init`
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        if self.closed {
            SessionState::Closed
        } else if self.handshake_complete {
            SessionState::Established
        } else {
            SessionState::Init
        }
    }

    /// Check if the handshake latch is set
    pub fn is_handshake_complete(&self) -> bool {
        self.handshake_complete
    }

    /// Check if the session is closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Check if frames other than a handshake may be processed
    pub fn can_transfer_data(&self) -> bool {
        self.state() == SessionState::Established
    }

    /// Transition to the established state
    pub fn transition_to_established(&mut self) {
        if !self.closed {
            self.handshake_complete = true;
        }
    }

    /// Transition to the closed state
    pub fn transition_to_closed(&mut self) {
        self.closed = true;
    }
}

/// Strict monotonic epoch counter
///
/// The only allowed step is `current + 1`. Rollbacks and skips are refused
/// and leave the counter untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochCounter {
    epoch: u64,
}

/// Refused epoch step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochStep {
    /// Epoch before the attempted step
    pub current: u64,
    /// Epoch the caller asked for
    pub attempted: u64,
    /// The only epoch that would have been accepted
    pub expected: Option<u64>,
}

impl EpochCounter {
    /// Create a counter at epoch 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter starting at the given epoch
    pub fn starting_at(epoch: u64) -> Self {
        Self { epoch }
    }

    /// Current epoch
    pub fn current(&self) -> u64 {
        self.epoch
    }

    /// The epoch that `set` would accept next, if any
    pub fn next(&self) -> Option<u64> {
        self.epoch.checked_add(1)
    }

    /// Advance by exactly one and return the new epoch
    pub fn advance(&mut self) -> std::result::Result<u64, EpochStep> {
        let next = self.next().ok_or(EpochStep {
            current: self.epoch,
            attempted: self.epoch,
            expected: None,
        })?;
        self.epoch = next;
        Ok(next)
    }

    /// Set the epoch, accepting only `current + 1`
    pub fn set(&mut self, new_epoch: u64) -> std::result::Result<u64, EpochStep> {
        let expected = self.next();
        if expected != Some(new_epoch) {
            return Err(EpochStep {
                current: self.epoch,
                attempted: new_epoch,
                expected,
            });
        }
        self.epoch = new_epoch;
        Ok(new_epoch)
    }
}
