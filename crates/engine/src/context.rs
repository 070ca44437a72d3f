//! Explicit per-configuration context handed to every element.

use crate::core::{BrightnessMap, CoordinateSystem};
use crate::types::{Rgb, Vec2, SCENE_BACKGROUND};

/// Everything elements need to know about the current configuration.
///
/// Rebuilt whenever the glyph alphabet, cell size, pixel ratio or layout changes; read
/// only during a frame.
#[derive(Debug, Clone)]
pub struct FieldContext {
    pub brightness: BrightnessMap,
    pub coords: CoordinateSystem,
    pub is_mobile: bool,
    /// Scene background; the picture surface is filled with it each frame.
    pub background: Rgb,
}

impl FieldContext {
    pub fn new(brightness: BrightnessMap, coords: CoordinateSystem, is_mobile: bool) -> Self {
        Self {
            brightness,
            coords,
            is_mobile,
            background: SCENE_BACKGROUND,
        }
    }

    /// Glyph-surface resolution in cells.
    pub fn resolution(&self) -> Vec2 {
        self.coords.resolution()
    }

    /// Cell size in picture-surface pixels.
    pub fn cell_size(&self) -> Vec2 {
        self.coords.cell_size()
    }
}
