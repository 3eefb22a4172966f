//! Protocol entry points for the QSP session guard.
//!
//! This module contains the session builder.

// Builder
pub mod builder;

// Re-export for convenience
pub use builder::{SessionBuilder, session};
