//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::FieldAction`]s and
//! pointer events. Held scroll keys repeat on a timer, with a release timeout for
//! terminals that never report key releases.

pub mod handler;
pub mod map;

pub use ascii_field_types as types;

pub use handler::{InputHandler, PointerEvent};
pub use map::{handle_key_event, should_quit};
