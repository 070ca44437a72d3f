//! Per-pixel compositing of the glyph surface, picture surface, scene and atlas.
//!
//! For every output pixel at `uv`:
//!
//! 1. `d = cell / resolution`; pixelized uv = `d * (floor(uv / d) + 0.5)`
//! 2. scene and glyph surface are read at the pixelized uv, the picture at `uv`
//! 3. `gray` = scene luma, or glyph alpha where the glyph surface has ink
//! 4. atlas cell `floor(gray * (count - 0.001))`, sampled at `fract(uv * division)`
//! 5. `ascii = clamp((coverage - 0.5) * sharpness + 0.5)^curve`
//! 6. backdrop = scene covered by the gamma-adjusted picture
//! 7. output = `mix(backdrop, base, ascii)` with base = glyph ink or pixelized scene

use crate::atlas::GlyphAtlas;
use crate::core::pixmap::{self, Pixmap, Sampling};
use crate::core::{GlyphSurface, PictureSurface, Surfaces};
use crate::frame::FrameImage;
use crate::types::{Rgb, Vec2};

/// Supplies the 3D scene texture.
pub trait SceneSource {
    /// Scene color at normalized `uv`.
    fn sample(&self, uv: Vec2) -> Rgb;
}

impl SceneSource for Rgb {
    #[inline]
    fn sample(&self, _uv: Vec2) -> Rgb {
        *self
    }
}

impl SceneSource for Pixmap {
    #[inline]
    fn sample(&self, uv: Vec2) -> Rgb {
        pixmap::sample(self, uv.x, uv.y, Sampling::Bilinear).rgb()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeParams {
    /// Contrast applied to atlas coverage around 0.5.
    pub sharpness: f32,
    /// Exponent applied after the contrast step.
    pub curve: f32,
    /// Gamma applied to the picture surface.
    pub gamma: f32,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            sharpness: 2.0,
            curve: 2.0,
            gamma: 2.2,
        }
    }
}

/// Atlas cell for a gray value: `floor(gray * (count - 0.001))`, clamped into range.
#[inline]
pub fn glyph_index(gray: f32, count: u32) -> u32 {
    if count == 0 || !(gray > 0.0) {
        return 0;
    }
    let i = (gray * (count as f32 - 0.001)).floor() as u32;
    i.min(count - 1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compositor {
    params: CompositeParams,
    cell_size: Vec2,
    resolution: Vec2,
}

impl Compositor {
    /// `cell_size` and the output size are in device pixels.
    pub fn new(cell_size: u32, width: u32, height: u32) -> Self {
        Self {
            params: CompositeParams::default(),
            cell_size: Vec2::splat(cell_size.max(1) as f32),
            resolution: Vec2::new(width.max(1) as f32, height.max(1) as f32),
        }
    }

    pub fn with_params(mut self, params: CompositeParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &CompositeParams {
        &self.params
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.resolution = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = Vec2::splat(cell_size.max(1) as f32);
    }

    /// Output size in device pixels.
    pub fn resolution(&self) -> (u32, u32) {
        (self.resolution.x as u32, self.resolution.y as u32)
    }

    /// Final color of the output pixel at `uv`.
    pub fn frame_color<S: SceneSource + ?Sized>(
        &self,
        uv: Vec2,
        scene: &S,
        glyph: &GlyphSurface,
        picture: &PictureSurface,
        atlas: &GlyphAtlas,
    ) -> Rgb {
        let division = Vec2::new(
            self.resolution.x / self.cell_size.x,
            self.resolution.y / self.cell_size.y,
        );
        let cell = Vec2::new((uv.x * division.x).floor(), (uv.y * division.y).floor());
        let pixel_uv = Vec2::new((cell.x + 0.5) / division.x, (cell.y + 0.5) / division.y);

        let scene_px = scene.sample(pixel_uv);
        let ink = glyph.texel(cell.x as i32, cell.y as i32);

        let pic = picture.sample(uv.x, uv.y);
        let scene_full = scene.sample(uv);
        let backdrop = scene_full.lerp(pic.rgb().powf(self.params.gamma), pic.a.clamp(0.0, 1.0));

        let has_ink = ink.a > 0.0;
        let gray = if has_ink { ink.a } else { scene_px.luma() };

        let index = glyph_index(gray, atlas.count());
        let local = Vec2::new(uv.x * division.x - cell.x, uv.y * division.y - cell.y);
        let coverage = atlas.coverage(index, local);
        let ascii = ((coverage - 0.5) * self.params.sharpness + 0.5)
            .clamp(0.0, 1.0)
            .powf(self.params.curve);

        if ascii <= 0.0 {
            return backdrop;
        }
        let base = if has_ink { ink.rgb() } else { scene_px };
        backdrop.lerp(base, ascii)
    }

    /// Composite a whole frame into `out`, resizing it to the compositor resolution.
    ///
    /// Allocation-free once `out` has reached its size.
    pub fn composite_into<S: SceneSource + ?Sized>(
        &self,
        scene: &S,
        surfaces: &Surfaces,
        atlas: &GlyphAtlas,
        out: &mut FrameImage,
    ) {
        let (w, h) = self.resolution();
        out.resize(w, h);
        let inv_w = 1.0 / w as f32;
        let inv_h = 1.0 / h as f32;
        for y in 0..h {
            let v = (y as f32 + 0.5) * inv_h;
            for x in 0..w {
                let u = (x as f32 + 0.5) * inv_w;
                let c = self.frame_color(Vec2::new(u, v), scene, &surfaces.glyph, &surfaces.picture, atlas);
                out.put(x, y, c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{recreate, SurfaceConfig};
    use crate::types::Rgba;

    fn solid_atlas() -> GlyphAtlas {
        // Two cells: empty and fully covered.
        let mut pm = pixmap::filled(4, 2, Rgba::new(0.0, 0.0, 0.0, 1.0)).unwrap();
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(tiny_skia::Color::WHITE);
        let rect = tiny_skia::Rect::from_xywh(2.0, 0.0, 2.0, 2.0).unwrap();
        pm.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
        GlyphAtlas::from_pixmap(&pm, 2, 1).unwrap()
    }

    #[test]
    fn glyph_index_stays_in_range() {
        assert_eq!(glyph_index(0.0, 10), 0);
        assert_eq!(glyph_index(1.0, 10), 9);
        assert_eq!(glyph_index(0.5, 10), 4);
        assert_eq!(glyph_index(2.0, 10), 9);
        assert_eq!(glyph_index(f32::NAN, 10), 0);
        assert_eq!(glyph_index(0.7, 0), 0);
    }

    #[test]
    fn ink_cell_shows_ink_color_only() {
        let cfg = SurfaceConfig::new(40, 20, 1.0, 20);
        let mut s = recreate(&cfg);
        s.clear(Rgb::new(0.0, 0.0, 1.0));
        let ink = Rgb::new(1.0, 0.0, 0.0);
        s.glyph.put_texel(0, 0, ink.with_alpha(1.0));

        let comp = Compositor::new(20, 40, 20);
        let c = comp.frame_color(Vec2::new(0.25, 0.5), &Rgb::BLACK, &s.glyph, &s.picture, &solid_atlas());
        assert_eq!(c, ink);
    }

    #[test]
    fn opaque_picture_hides_scene() {
        let cfg = SurfaceConfig::new(40, 20, 1.0, 20);
        let mut s = recreate(&cfg);
        s.clear(Rgb::new(0.5, 0.5, 0.5));

        let comp = Compositor::new(20, 40, 20);
        let scene = Rgb::new(0.0, 0.0, 0.0);
        let c = comp.frame_color(Vec2::new(0.75, 0.5), &scene, &s.glyph, &s.picture, &solid_atlas());
        let expected = Rgb::new(0.5, 0.5, 0.5).powf(2.2);
        assert!((c.r - expected.r).abs() < 0.01);
    }

    #[test]
    fn transparent_picture_shows_scene() {
        let cfg = SurfaceConfig::new(40, 20, 1.0, 20);
        let s = recreate(&cfg);
        let comp = Compositor::new(20, 40, 20);
        let scene = Rgb::new(0.2, 0.2, 0.2);
        let c = comp.frame_color(Vec2::new(0.75, 0.5), &scene, &s.glyph, &s.picture, &solid_atlas());
        // Scene luma 0.2 selects the empty glyph, so the backdrop shows through.
        assert!((c.r - 0.2).abs() < 1e-5);
    }

    #[test]
    fn composite_fills_every_pixel() {
        let cfg = SurfaceConfig::new(40, 20, 1.0, 20);
        let mut s = recreate(&cfg);
        s.clear(Rgb::BLACK);
        let comp = Compositor::new(20, 40, 20);
        let mut out = FrameImage::new(1, 1);
        comp.composite_into(&Rgb::BLACK, &s, &solid_atlas(), &mut out);
        assert_eq!((out.width(), out.height()), (40, 20));
        assert!(out.as_bytes().chunks_exact(4).all(|p| p[3] == 255));
    }
}
