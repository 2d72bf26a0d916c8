//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::Intent`]s and, for terminals that never report key
//! releases, synthesizes the missing key-up intents after a timeout.

pub mod map;
pub mod release;

pub use tui_tetramino_types as types;

pub use map::{control_for, map_key_event, Control};
pub use release::KeyReleaseTracker;

/// Intents gathered during one frame
pub type Intents = arrayvec::ArrayVec<types::Intent, 32>;
