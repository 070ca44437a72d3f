//! CPU compositor: turns the glyph surface, the picture surface and a scene texture
//! into the final frame, picking a glyph from the atlas for every cell.
//!
//! This is the software rendition of a full-screen post-processing pass. It runs once
//! per frame after the engine has drawn both surfaces, and it never allocates once the
//! output frame has reached its size.

pub mod atlas;
pub mod compositor;
pub mod frame;

pub use ascii_field_core as core;
pub use ascii_field_types as types;

pub use atlas::{AtlasError, GlyphAtlas};
pub use compositor::{glyph_index, CompositeParams, Compositor, SceneSource};
pub use frame::FrameImage;
