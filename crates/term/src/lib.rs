//! Terminal preview of the glyph field.
//!
//! Instead of compositing pixels, the preview shows one terminal cell per glyph cell:
//! the glyph surface decides the character and its color, the picture surface decides
//! the cell background. The result is written into a [`CellGrid`] and flushed with
//! diff encoding so only changed runs reach the terminal.
//!
//! Goals:
//! - Keep the view pure (no I/O) and allocation-free per frame
//! - Only write what changed between frames
//! - Let the host throttle redraws while nothing moves

pub mod cells;
pub mod field_view;
pub mod render_throttle;
pub mod renderer;

pub use ascii_field_core as core;
pub use ascii_field_types as types;

pub use cells::{CellGrid, FieldCell, TermColor};
pub use field_view::{FieldView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
