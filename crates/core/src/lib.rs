//! Core field logic module - pure, deterministic, and testable
//!
//! This crate holds the numeric heart of the glyph renderer. It has **no dependencies**
//! on windowing, terminals, GPUs, or I/O (picture rasterization is tiny-skia on the CPU),
//! which makes it:
//!
//! - **Deterministic**: the same inputs always produce the same surfaces
//! - **Testable**: every layout, fade and scroll rule is unit tested
//! - **Portable**: the same code drives the terminal preview and the headless renderer
//!
//! # Module Structure
//!
//! - [`brightness`]: character -> brightness mapping and its inverse
//! - [`coords`]: cell / surface-pixel / viewport-pixel conversions and alignment
//! - [`pixmap`]: tiny-skia pixmaps for images, with straight-alpha readback and sampling
//! - [`surface`]: the glyph and picture render surfaces and their manager
//! - [`anim`]: exponential damping, eased fades, scroll accumulation and momentum
//! - [`text`]: block sizing and word wrapping
//! - [`grid`]: column fitting and card placement for scrollable grids
//!
//! # Frame model
//!
//! One tick per displayed frame. Surfaces are recreated between ticks when the viewport
//! changes, cleared at the start of a tick, drawn into by the engine, and read by the
//! compositor once the tick is over.
//!
//! # Example
//!
//! ```
//! use ascii_field_core::{BrightnessMap, SurfaceConfig, RenderSurfaceManager};
//! use ascii_field_core::types::Rgb;
//!
//! let map = BrightnessMap::new(" .:#");
//! assert_eq!(map.brightness('#'), 1.0);
//!
//! let mut manager = RenderSurfaceManager::new(SurfaceConfig::new(200, 100, 1.0, 20));
//! let surfaces = manager.begin_frame(Rgb::BLACK);
//! assert_eq!(surfaces.glyph.resolution(), (10, 5));
//! assert_eq!(surfaces.picture.resolution(), (200, 100));
//! ```

pub mod anim;
pub mod brightness;
pub mod coords;
pub mod grid;
pub mod pixmap;
pub mod surface;
pub mod text;

pub use ascii_field_types as types;

// Re-export commonly used types for convenience
pub use anim::{damp, ease_in_out_sine, FadeAnimator, ScrollAnimator, ScrollMomentum};
pub use brightness::BrightnessMap;
pub use coords::{align_offset, grid_canvas_size, CoordinateSystem, GridCanvas, OverlayRect};
pub use grid::{calculate_grid_columns, GridLayout};
pub use pixmap::{Pixmap, Sampling};
pub use surface::{
    recreate, GlyphSurface, PictureSurface, RenderSurfaceManager, SurfaceConfig, SurfaceKind, Surfaces,
};
pub use text::{block_size, wrap_text};
