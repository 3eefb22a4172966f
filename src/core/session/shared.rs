/*!
Thread-shared session handle.

A [`SessionEngine`] is driven through `&mut self` by a single caller. When
several threads must reach the same session, `SharedSession` serializes
every operation behind one exclusive lock so each transition stays atomic.
*/

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{
    error::{Result, Violation},
    message::{adapter::RawFrame, frame::{Accepted, Frame}},
};

use super::engine::SessionEngine;
use super::state::SessionState;

/// Cloneable handle to a lock-protected session
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionEngine>>,
}

impl SharedSession {
    /// Wrap an engine for shared use
    pub fn new(engine: SessionEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// A poisoned lock means a holder panicked mid-transition; the session
    /// is treated as closed from then on.
    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, SessionEngine>> {
        self.inner
            .lock()
            .map_err(|_| Violation::SessionClosed(format!("{operation} on poisoned session")))
    }

    /// Validate and apply a canonical frame
    pub fn accept_frame(&self, frame: Frame) -> Result<Accepted> {
        self.lock("accept_frame")?.accept_frame(frame)
    }

    /// Normalize and accept a raw frame
    pub fn ingest(&self, raw: &RawFrame) -> Result<Accepted> {
        self.lock("ingest")?.ingest(raw)
    }

    /// Advance the epoch by one
    pub fn advance_epoch(&self) -> Result<u64> {
        self.lock("advance_epoch")?.advance_epoch()
    }

    /// Current state; `Closed` if the lock is poisoned
    pub fn state(&self) -> SessionState {
        self.inner
            .lock()
            .map(|engine| engine.state())
            .unwrap_or(SessionState::Closed)
    }

    /// Run a read-only inspection under the lock
    pub fn inspect<R>(&self, f: impl FnOnce(&SessionEngine) -> R) -> Result<R> {
        let engine = self.lock("inspect")?;
        Ok(f(&engine))
    }
}

impl From<SessionEngine> for SharedSession {
    fn from(engine: SessionEngine) -> Self {
        Self::new(engine)
    }
}
