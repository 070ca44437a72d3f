//! Glyph atlas - a grid of glyph coverage cells ordered from darkest to brightest.
//!
//! Cell `i` sits at column `i % columns`, row `i / columns`. Only the red channel is
//! read; it is the glyph's coverage at that texel.

use std::path::Path;

use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, PixmapPaint, Transform};

use crate::core::pixmap::{self, Pixmap};
use crate::types::Vec2;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to decode atlas image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("atlas grid {columns}x{rows} does not divide a {width}x{height} image")]
    Grid {
        columns: u32,
        rows: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    /// Row-major coverage over the whole atlas image.
    coverage: Vec<f32>,
    width: u32,
    columns: u32,
    rows: u32,
    cell_width: u32,
    cell_height: u32,
}

impl GlyphAtlas {
    /// Read the red channel of a pixmap laid out as a `columns` x `rows` grid.
    pub fn from_pixmap(pixmap: &Pixmap, columns: u32, rows: u32) -> Result<Self, AtlasError> {
        let (width, height) = (pixmap.width(), pixmap.height());
        if columns == 0 || rows == 0 || width % columns != 0 || height % rows != 0 || width < columns || height < rows {
            return Err(AtlasError::Grid {
                columns,
                rows,
                width,
                height,
            });
        }
        Ok(Self {
            coverage: pixmap.pixels().iter().map(|p| p.red() as f32 / 255.0).collect(),
            width,
            columns,
            rows,
            cell_width: width / columns,
            cell_height: height / rows,
        })
    }

    fn from_rgba_image(img: image::RgbaImage, columns: u32, rows: u32) -> Result<Self, AtlasError> {
        let (w, h) = img.dimensions();
        let pixmap = pixmap::from_rgba8(w, h, img.as_raw()).ok_or(AtlasError::Grid {
            columns,
            rows,
            width: w,
            height: h,
        })?;
        Self::from_pixmap(&pixmap, columns, rows)
    }

    /// Decode an atlas image from memory.
    pub fn from_image_bytes(bytes: &[u8], columns: u32, rows: u32) -> Result<Self, AtlasError> {
        Self::from_rgba_image(image::load_from_memory(bytes)?.to_rgba8(), columns, rows)
    }

    /// Decode an atlas image from disk.
    pub fn open(path: impl AsRef<Path>, columns: u32, rows: u32) -> Result<Self, AtlasError> {
        Self::from_rgba_image(image::open(path)?.to_rgba8(), columns, rows)
    }

    /// Build an atlas without any font: cell `i` holds an antialiased disc whose area
    /// grows with `i / (count - 1)`, so coverage rises monotonically with the index.
    ///
    /// Each disc is rasterized into a cell-sized scratch pixmap and copied into place, so
    /// discs larger than the cell are clipped to it.
    pub fn procedural(count: u32, cell_px: u32) -> Self {
        let count = count.max(1);
        let cell_px = cell_px.max(2);
        let columns = (count as f32).sqrt().ceil() as u32;
        let rows = count.div_ceil(columns);
        let (width, height) = (columns * cell_px, rows * cell_px);

        let mut atlas = Self {
            coverage: vec![0.0; (width as usize) * (height as usize)],
            width,
            columns,
            rows,
            cell_width: cell_px,
            cell_height: cell_px,
        };
        let (Some(mut sheet), Some(mut cell)) = (Pixmap::new(width, height), Pixmap::new(cell_px, cell_px)) else {
            return atlas;
        };

        let size = cell_px as f32;
        let mut paint = Paint::default();
        paint.set_color(Color::WHITE);
        for index in 1..count {
            let b = index as f32 / (count - 1) as f32;
            let radius = size * (b / std::f32::consts::PI).sqrt();
            let Some(disc) = PathBuilder::from_circle(size / 2.0, size / 2.0, radius) else {
                continue;
            };
            cell.fill(Color::TRANSPARENT);
            cell.fill_path(&disc, &paint, FillRule::Winding, Transform::identity(), None);
            let ox = ((index % columns) * cell_px) as i32;
            let oy = ((index / columns) * cell_px) as i32;
            sheet.draw_pixmap(ox, oy, cell.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }

        atlas.coverage = sheet.pixels().iter().map(|p| p.red() as f32 / 255.0).collect();
        atlas
    }

    /// Number of glyph cells (`columns * rows`).
    pub fn count(&self) -> u32 {
        self.columns * self.rows
    }

    pub fn grid(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Coverage of glyph `index` at `local` (each axis in [0, 1) within the cell).
    ///
    /// Bilinear within the cell; samples never bleed into a neighbouring glyph.
    #[inline]
    pub fn coverage(&self, index: u32, local: Vec2) -> f32 {
        let index = index.min(self.count().saturating_sub(1));
        let ox = ((index % self.columns) * self.cell_width) as i32;
        let oy = ((index / self.columns) * self.cell_height) as i32;
        let cw = self.cell_width as i32;
        let ch = self.cell_height as i32;

        let fx = local.x.clamp(0.0, 1.0) * self.cell_width as f32 - 0.5;
        let fy = local.y.clamp(0.0, 1.0) * self.cell_height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i32, y0 as i32);

        let texel = |x: i32, y: i32| {
            let x = (x.clamp(0, cw - 1) + ox) as usize;
            let y = (y.clamp(0, ch - 1) + oy) as usize;
            self.coverage.get(y * self.width as usize + x).copied().unwrap_or(0.0)
        };

        let top = texel(x0, y0) + (texel(x0 + 1, y0) - texel(x0, y0)) * tx;
        let bottom = texel(x0, y0 + 1) + (texel(x0 + 1, y0 + 1) - texel(x0, y0 + 1)) * tx;
        top + (bottom - top) * ty
    }

    /// Mean coverage of glyph `index` over its whole cell.
    pub fn mean_coverage(&self, index: u32) -> f32 {
        let index = index.min(self.count().saturating_sub(1));
        let ox = ((index % self.columns) * self.cell_width) as i32;
        let oy = ((index / self.columns) * self.cell_height) as i32;
        let mut sum = 0.0;
        for y in 0..self.cell_height as i32 {
            for x in 0..self.cell_width as i32 {
                let i = (oy + y) as usize * self.width as usize + (ox + x) as usize;
                sum += self.coverage.get(i).copied().unwrap_or(0.0);
            }
        }
        sum / (self.cell_width * self.cell_height) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_coverage_increases_with_index() {
        let atlas = GlyphAtlas::procedural(16, 12);
        assert_eq!(atlas.count(), 16);
        assert_eq!(atlas.mean_coverage(0), 0.0);
        let mut last = 0.0;
        for i in 1..16 {
            let c = atlas.mean_coverage(i);
            assert!(c > last, "glyph {i}: {c} <= {last}");
            last = c;
        }
    }

    #[test]
    fn brightest_glyph_is_solid_at_center() {
        let atlas = GlyphAtlas::procedural(8, 16);
        assert!((atlas.coverage(7, Vec2::splat(0.5)) - 1.0).abs() < 1e-6);
        assert_eq!(atlas.coverage(0, Vec2::splat(0.5)), 0.0);
    }

    #[test]
    fn rejects_grid_that_does_not_divide_image() {
        let pm = Pixmap::new(10, 10).unwrap();
        assert!(matches!(
            GlyphAtlas::from_pixmap(&pm, 3, 1),
            Err(AtlasError::Grid { .. })
        ));
    }

    #[test]
    fn loads_from_png_bytes() {
        let mut img = image::RgbaImage::new(4, 2);
        img.put_pixel(2, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(3, 1, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let atlas = GlyphAtlas::from_image_bytes(&bytes, 2, 1).unwrap();
        assert_eq!(atlas.count(), 2);
        assert_eq!(atlas.cell_size(), (2, 2));
        assert_eq!(atlas.mean_coverage(0), 0.0);
        assert_eq!(atlas.mean_coverage(1), 0.5);
    }
}
