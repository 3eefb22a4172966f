/*!
Frame handling for the QSP session guard.

This module provides the frame types, the loosely typed boundary values,
the canonical frame and the adapter that normalizes both boundary encodings.
*/

pub mod types;
pub mod value;
pub mod frame;
pub mod adapter;

// Re-export commonly used items
pub use types::{FrameType, TransitionKind};
pub use value::Value;
pub use frame::{Frame, Accepted};
pub use adapter::{normalize, LegacyFrame, RawFrame, StructuredRecord};
