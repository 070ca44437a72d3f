//! Coordinate conversions between cells, surface pixels and viewport pixels.
//!
//! - cell -> surface pixel: `cell * cell_size`
//! - surface pixel -> viewport pixel: `px / pixel_ratio - canvas_offset`
//!
//! The overlay host lives in viewport pixels, every element lives in cells, and the
//! picture surface lives in surface (device) pixels.

use crate::types::{HorizontalAlign, Vec2, VerticalAlign};

/// An axis-aligned rectangle in viewport pixels, used to place overlay twins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Half-open containment test (`left <= x < left + width`).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Read-only conversion parameters, rebuilt whenever cell size or pixel ratio change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSystem {
    cell_size: Vec2,
    pixel_ratio: f32,
    canvas_offset: Vec2,
    resolution: Vec2,
}

impl CoordinateSystem {
    /// `cell_size` is in surface (device) pixels; `resolution` is the glyph-surface size
    /// in cells.
    pub fn new(cell_size: Vec2, pixel_ratio: f32, resolution: Vec2) -> Self {
        Self {
            cell_size,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
            canvas_offset: Vec2::ZERO,
            resolution,
        }
    }

    /// Set the centering offset (viewport pixels) of a canvas larger than the viewport.
    pub fn with_canvas_offset(mut self, offset: Vec2) -> Self {
        self.canvas_offset = offset;
        self
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn canvas_offset(&self) -> Vec2 {
        self.canvas_offset
    }

    /// Glyph-surface resolution in cells.
    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    pub fn cell_to_surface(&self, cell: Vec2) -> Vec2 {
        cell.scale(self.cell_size)
    }

    pub fn surface_to_cell(&self, px: Vec2) -> Vec2 {
        Vec2::new(px.x / self.cell_size.x, px.y / self.cell_size.y)
    }

    pub fn cell_to_viewport(&self, cell: Vec2) -> Vec2 {
        self.cell_to_surface(cell) * (1.0 / self.pixel_ratio) - self.canvas_offset
    }

    pub fn viewport_to_cell(&self, px: Vec2) -> Vec2 {
        self.surface_to_cell((px + self.canvas_offset) * self.pixel_ratio)
    }

    /// Overlay rectangle for an element at `position` with `size` (both in cells).
    pub fn overlay_rect(&self, position: Vec2, size: Vec2) -> OverlayRect {
        let origin = self.cell_to_viewport(position);
        let extent = self.cell_to_surface(size) * (1.0 / self.pixel_ratio);
        OverlayRect::new(origin.x, origin.y, extent.x, extent.y)
    }
}

/// Offset that aligns a block of `size` cells inside `resolution` cells.
///
/// The result may be negative (block wider than the surface); callers add it to the
/// element position exactly once.
pub fn align_offset(
    horizontal: HorizontalAlign,
    vertical: VerticalAlign,
    resolution: Vec2,
    size: Vec2,
) -> Vec2 {
    Vec2::new(
        (resolution.x - size.x) * horizontal.factor(),
        (resolution.y - size.y) * vertical.factor(),
    )
}

/// Canvas sized to a whole number of cells covering the viewport, plus its centering
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCanvas {
    pub columns: u32,
    pub rows: u32,
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
}

/// Compute a cell-aligned canvas that covers `viewport` with a small bleed.
///
/// Low pixel ratios get up to four extra cells per axis so partially visible cells at
/// the edges are still drawn; the canvas is then centered over the viewport.
pub fn grid_canvas_size(viewport_width: u32, viewport_height: u32, cell: u32, pixel_ratio: f32) -> GridCanvas {
    let cell = cell.max(1);
    let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    let bleed = (4.0 / ratio).floor() as u32;

    let columns = viewport_width / cell + bleed;
    let rows = viewport_height / cell + bleed;
    let width = columns * cell;
    let height = rows * cell;

    GridCanvas {
        columns,
        rows,
        width,
        height,
        left: ((width as i64 - viewport_width as i64) / 2) as i32,
        top: ((height as i64 - viewport_height as i64) / 2) as i32,
    }
}
