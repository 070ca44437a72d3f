//! Render surfaces - the glyph surface and the picture surface
//!
//! Two surfaces are alive at any time:
//!
//! | Surface | Texel | Storage | Resolution | Sampling |
//! |---------|-------|---------|------------|----------|
//! | Glyph | one cell | float RGBA | `floor(device_px / cell_px)` | nearest |
//! | Picture | one device pixel | `tiny_skia::Pixmap` | `device_px` | bilinear |
//!
//! Picture drawing (rects, strokes, scaled images, gradients) is rasterized by tiny-skia.
//!
//! Surfaces are never resized in place. Any change to the viewport, the cell size or the
//! device pixel ratio produces a fresh pair through [`recreate`]; the manager bumps its
//! generation so holders of stale sizes can tell.

use tiny_skia::{
    BlendMode, FillRule, FilterQuality, GradientStop, LineCap, LinearGradient, Mask, Paint,
    PathBuilder, PixmapPaint, Point, Rect, SpreadMode, Stroke, Transform,
};

use crate::coords::CoordinateSystem;
use crate::pixmap::{self, Pixmap, Sampling};
use crate::types::{Rgb, Rgba, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Glyph,
    Picture,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Glyph => "glyph",
            SurfaceKind::Picture => "picture",
        }
    }

    /// Filtering the compositor uses when reading this surface.
    pub fn sampling(&self) -> Sampling {
        match self {
            SurfaceKind::Glyph => Sampling::Nearest,
            SurfaceKind::Picture => Sampling::Bilinear,
        }
    }
}

/// Rasterize a stroked segment into a coverage mask, without antialiasing.
///
/// Square caps make a one-texel line through cell centers cover both end cells.
fn segment_mask(width: u32, height: u32, a: Vec2, b: Vec2, stroke_width: f32) -> Option<Mask> {
    let mut pb = PathBuilder::new();
    pb.move_to(a.x, a.y);
    pb.line_to(b.x, b.y);
    let path = pb.finish()?;
    let stroke = Stroke {
        width: stroke_width.max(1.0),
        line_cap: LineCap::Square,
        ..Stroke::default()
    };
    let outline = path.stroke(&stroke, 1.0)?;
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(&outline, FillRule::Winding, false, Transform::identity());
    Some(mask)
}

/// The glyph surface: one straight-alpha float texel per cell.
///
/// Alpha carries glyph brightness, so it keeps full float precision; the compositor maps
/// it back onto atlas cells. Fractional rectangles round to the nearest cell edge and all
/// drawing is clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSurface {
    width: u32,
    height: u32,
    texels: Vec<Rgba>,
}

impl GlyphSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels: vec![Rgba::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        SurfaceKind::Glyph
    }

    /// `(columns, rows)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texels(&self) -> &[Rgba] {
        &self.texels
    }

    /// Whether no cell carries ink.
    pub fn is_clear(&self) -> bool {
        self.texels.iter().all(|t| t.is_transparent())
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    #[inline]
    pub fn texel(&self, x: i32, y: i32) -> Rgba {
        self.idx(x, y).map_or(Rgba::TRANSPARENT, |i| self.texels[i])
    }

    /// Nearest texel at normalized coordinates.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        self.texel(
            (u * self.width as f32).floor() as i32,
            (v * self.height as f32).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.texels.fill(Rgba::TRANSPARENT);
    }

    /// Source-over one cell.
    pub fn put_texel(&mut self, x: i32, y: i32, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        if let Some(i) = self.idx(x, y) {
            self.texels[i] = color.over(self.texels[i]);
        }
    }

    /// Source-over a block of cells.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let x0 = x.round().max(0.0) as i64;
        let y0 = y.round().max(0.0) as i64;
        let x1 = ((x + w).round() as i64).min(self.width as i64);
        let y1 = ((y + h).round() as i64).min(self.height as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put_texel(px as i32, py as i32, color);
            }
        }
    }

    /// Stroke a segment `a -> b` across cells.
    ///
    /// A cell is inked when its center falls inside the stroke outline.
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba) {
        if color.is_transparent() || self.texels.is_empty() {
            return;
        }
        let Some(mask) = segment_mask(self.width, self.height, a, b, width) else {
            return;
        };
        for (texel, &coverage) in self.texels.iter_mut().zip(mask.data()) {
            if coverage > 0 {
                *texel = color.over(*texel);
            }
        }
    }
}

/// The picture surface: device pixels in a `tiny_skia::Pixmap`.
///
/// A zero-sized viewport leaves the surface without a pixmap; drawing is then a no-op and
/// every texel reads transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureSurface {
    pixmap: Option<Pixmap>,
}

impl PictureSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        SurfaceKind::Picture
    }

    /// `(width, height)` in device pixels.
    pub fn resolution(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map_or((0, 0), |p| (p.width(), p.height()))
    }

    pub fn width(&self) -> u32 {
        self.resolution().0
    }

    pub fn height(&self) -> u32 {
        self.resolution().1
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Whether every pixel is fully transparent.
    pub fn is_clear(&self) -> bool {
        self.pixmap
            .as_ref()
            .map_or(true, |p| p.pixels().iter().all(|c| c.alpha() == 0))
    }

    /// Straight-alpha pixel; transparent outside the surface.
    pub fn texel(&self, x: i32, y: i32) -> Rgba {
        self.pixmap
            .as_ref()
            .and_then(|p| pixmap::texel(p, x, y))
            .unwrap_or(Rgba::TRANSPARENT)
    }

    /// Bilinear sample at normalized coordinates.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        match &self.pixmap {
            Some(p) => pixmap::sample(p, u, v, self.kind().sampling()),
            None => Rgba::TRANSPARENT,
        }
    }

    pub fn clear(&mut self) {
        if let Some(p) = &mut self.pixmap {
            p.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    /// Fill every pixel with an opaque color.
    pub fn fill(&mut self, color: Rgb) {
        if let Some(p) = &mut self.pixmap {
            p.fill(pixmap::skia_color(color.with_alpha(1.0)));
        }
    }

    fn solid(color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(pixmap::skia_color(color));
        paint.anti_alias = false;
        paint
    }

    /// Source-over a filled rectangle. Edges snap to pixel centers.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let (Some(p), Some(rect)) = (&mut self.pixmap, Rect::from_xywh(x, y, w, h)) else {
            return;
        };
        p.fill_rect(rect, &Self::solid(color), Transform::identity(), None);
    }

    /// Make a rectangle fully transparent.
    pub fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (Some(p), Some(rect)) = (&mut self.pixmap, Rect::from_xywh(x, y, w, h)) else {
            return;
        };
        let mut paint = Self::solid(Rgba::new(0.0, 0.0, 0.0, 1.0));
        paint.blend_mode = BlendMode::Clear;
        p.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Outline a rectangle with a border of `width` pixels drawn inside its bounds.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Rgba) {
        let t = width.max(0.0).min(w / 2.0).min(h / 2.0);
        if t <= 0.0 || color.is_transparent() {
            return;
        }
        if w <= 2.0 * t || h <= 2.0 * t {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        let Some(inner) = Rect::from_xywh(x + t / 2.0, y + t / 2.0, w - t, h - t) else {
            return;
        };
        let Some(p) = &mut self.pixmap else {
            return;
        };
        let path = PathBuilder::from_rect(inner);
        let stroke = Stroke {
            width: t,
            ..Stroke::default()
        };
        p.stroke_path(&path, &Self::solid(color), &stroke, Transform::identity(), None);
    }

    /// Stroke an antialiased segment `a -> b`.
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let Some(p) = &mut self.pixmap else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(a.x, a.y);
        pb.line_to(b.x, b.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let mut paint = Self::solid(color);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: width.max(0.5),
            ..Stroke::default()
        };
        p.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Draw `src` scaled into the destination rectangle with an extra alpha factor.
    pub fn draw_pixmap(&mut self, src: &Pixmap, x: f32, y: f32, w: f32, h: f32, alpha: f32) {
        if alpha <= 0.0 || w <= 0.0 || h <= 0.0 {
            return;
        }
        let Some(p) = &mut self.pixmap else {
            return;
        };
        let mut paint = PixmapPaint::default();
        paint.opacity = alpha.min(1.0);
        paint.blend_mode = BlendMode::SourceOver;
        paint.quality = FilterQuality::Bilinear;
        let transform = Transform::from_row(
            w / src.width() as f32,
            0.0,
            0.0,
            h / src.height() as f32,
            x,
            y,
        );
        p.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    }

    /// Fill a rectangle with `color` whose alpha follows `stops` from its top edge
    /// (`t = 0`) to its bottom edge (`t = 1`). Stops are `(t, alpha)` pairs.
    pub fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, stops: &[(f32, f32)]) {
        let (Some(p), Some(rect)) = (&mut self.pixmap, Rect::from_xywh(x, y, w, h)) else {
            return;
        };
        let stops = stops
            .iter()
            .map(|&(t, a)| GradientStop::new(t, pixmap::skia_color(color.with_alpha(a))))
            .collect();
        let Some(shader) = LinearGradient::new(
            Point::from_xy(x, y),
            Point::from_xy(x, y + h),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.shader = shader;
        paint.anti_alias = false;
        p.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

/// Everything that determines surface sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Viewport width in CSS pixels.
    pub viewport_width: u32,
    /// Viewport height in CSS pixels.
    pub viewport_height: u32,
    pub pixel_ratio: f32,
    /// Cell edge in device pixels.
    pub cell_size: u32,
    /// Centering offset of the canvas inside the viewport (CSS pixels).
    pub canvas_offset: Vec2,
}

impl SurfaceConfig {
    pub fn new(viewport_width: u32, viewport_height: u32, pixel_ratio: f32, cell_size: u32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
            cell_size: cell_size.max(1),
            canvas_offset: Vec2::ZERO,
        }
    }

    pub fn with_canvas_offset(mut self, offset: Vec2) -> Self {
        self.canvas_offset = offset;
        self
    }

    /// Viewport size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (
            (self.viewport_width as f32 * self.pixel_ratio).floor() as u32,
            (self.viewport_height as f32 * self.pixel_ratio).floor() as u32,
        )
    }

    pub fn glyph_resolution(&self) -> (u32, u32) {
        let (w, h) = self.device_size();
        (w / self.cell_size, h / self.cell_size)
    }

    pub fn picture_resolution(&self) -> (u32, u32) {
        self.device_size()
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        let (cols, rows) = self.glyph_resolution();
        CoordinateSystem::new(
            Vec2::splat(self.cell_size as f32),
            self.pixel_ratio,
            Vec2::new(cols as f32, rows as f32),
        )
        .with_canvas_offset(self.canvas_offset)
    }
}

/// The live surface pair.
#[derive(Debug, Clone)]
pub struct Surfaces {
    pub glyph: GlyphSurface,
    pub picture: PictureSurface,
}

impl Surfaces {
    /// Clear both surfaces and fill the picture surface with the scene background.
    pub fn clear(&mut self, background: Rgb) {
        self.glyph.clear();
        self.picture.fill(background);
    }
}

/// Build a fresh surface pair for `config`.
pub fn recreate(config: &SurfaceConfig) -> Surfaces {
    let (gw, gh) = config.glyph_resolution();
    let (pw, ph) = config.picture_resolution();
    Surfaces {
        glyph: GlyphSurface::new(gw, gh),
        picture: PictureSurface::new(pw, ph),
    }
}

/// Owns the surface pair and swaps it out whenever the configuration changes.
#[derive(Debug)]
pub struct RenderSurfaceManager {
    config: SurfaceConfig,
    surfaces: Surfaces,
    generation: u64,
}

impl RenderSurfaceManager {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            surfaces: recreate(&config),
            config,
            generation: 0,
        }
    }

    /// Apply a new viewport. Returns `true` when the surfaces were recreated.
    ///
    /// Must be called between frames.
    pub fn on_resize(&mut self, viewport_width: u32, viewport_height: u32, pixel_ratio: f32) -> bool {
        let next = SurfaceConfig::new(viewport_width, viewport_height, pixel_ratio, self.config.cell_size)
            .with_canvas_offset(self.config.canvas_offset);
        self.apply(next)
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> bool {
        let mut next = self.config;
        next.cell_size = cell_size.max(1);
        self.apply(next)
    }

    /// Replace the whole configuration. Returns `true` when the surfaces were recreated.
    pub fn apply(&mut self, config: SurfaceConfig) -> bool {
        if config == self.config {
            return false;
        }
        let sizes_changed = config.glyph_resolution() != self.config.glyph_resolution()
            || config.picture_resolution() != self.config.picture_resolution()
            || config.cell_size != self.config.cell_size
            || config.pixel_ratio != self.config.pixel_ratio;
        self.config = config;
        if sizes_changed {
            self.surfaces = recreate(&self.config);
            self.generation += 1;
        }
        sizes_changed
    }

    /// Clear both surfaces for a new frame and hand them out for drawing.
    pub fn begin_frame(&mut self, background: Rgb) -> &mut Surfaces {
        self.surfaces.clear(background);
        &mut self.surfaces
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut Surfaces {
        &mut self.surfaces
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Number of times the surfaces were recreated since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.config.coordinate_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_resolution_floors_device_pixels() {
        let cfg = SurfaceConfig::new(205, 99, 1.0, 20);
        assert_eq!(cfg.glyph_resolution(), (10, 4));
        assert_eq!(cfg.picture_resolution(), (205, 99));

        let retina = SurfaceConfig::new(200, 100, 2.0, 20);
        assert_eq!(retina.glyph_resolution(), (20, 10));
        assert_eq!(retina.picture_resolution(), (400, 200));
    }

    #[test]
    fn resize_recreates_and_bumps_generation() {
        let mut mgr = RenderSurfaceManager::new(SurfaceConfig::new(200, 100, 1.0, 20));
        assert!(!mgr.on_resize(200, 100, 1.0));
        assert_eq!(mgr.generation(), 0);

        assert!(mgr.on_resize(400, 100, 1.0));
        assert_eq!(mgr.generation(), 1);
        assert_eq!(mgr.surfaces().glyph.resolution(), (20, 5));

        assert!(mgr.set_cell_size(10));
        assert_eq!(mgr.surfaces().glyph.resolution(), (40, 10));
        assert_eq!(mgr.generation(), 2);
    }

    #[test]
    fn canvas_offset_change_keeps_surfaces() {
        let mut mgr = RenderSurfaceManager::new(SurfaceConfig::new(200, 100, 1.0, 20));
        let cfg = mgr.config().with_canvas_offset(Vec2::new(3.0, 4.0));
        assert!(!mgr.apply(cfg));
        assert_eq!(mgr.coordinate_system().canvas_offset(), Vec2::new(3.0, 4.0));
        assert_eq!(mgr.generation(), 0);
    }

    #[test]
    fn begin_frame_clears_glyph_and_fills_picture() {
        let mut mgr = RenderSurfaceManager::new(SurfaceConfig::new(40, 20, 1.0, 20));
        mgr.surfaces_mut().glyph.put_texel(0, 0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        let bg = Rgb::new(0.2, 0.4, 0.6);
        let s = mgr.begin_frame(bg);
        assert!(s.glyph.is_clear());
        let px = s.picture.texel(5, 5);
        assert_eq!(px.a, 1.0);
        assert!((px.g - 0.4).abs() < 1.0 / 255.0);
    }

    #[test]
    fn zero_viewport_has_no_picture_pixels() {
        let mut s = PictureSurface::new(0, 10);
        assert_eq!(s.resolution(), (0, 0));
        s.fill_rect(0.0, 0.0, 4.0, 4.0, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert!(s.is_clear());
        assert!(s.texel(0, 0).is_transparent());
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut s = PictureSurface::new(4, 4);
        s.fill_rect(-2.0, -2.0, 4.0, 4.0, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(s.texel(0, 0).a, 1.0);
        assert_eq!(s.texel(1, 1).a, 1.0);
        assert_eq!(s.texel(2, 2).a, 0.0);
    }

    #[test]
    fn clear_rect_punches_a_hole() {
        let mut s = PictureSurface::new(4, 4);
        s.fill(Rgb::WHITE);
        s.clear_rect(1.0, 1.0, 2.0, 2.0);
        assert!(s.texel(1, 2).is_transparent());
        assert_eq!(s.texel(0, 0).a, 1.0);
        assert_eq!(s.texel(3, 3).a, 1.0);
    }

    #[test]
    fn glyph_line_covers_cells_along_segment() {
        let mut s = GlyphSurface::new(10, 3);
        s.draw_line(Vec2::new(0.5, 1.5), Vec2::new(9.5, 1.5), 1.0, Rgba::new(1.0, 1.0, 1.0, 0.5));
        for x in 0..10 {
            assert_eq!(s.texel(x, 1).a, 0.5);
            assert!(s.texel(x, 0).is_transparent());
            assert!(s.texel(x, 2).is_transparent());
        }
    }

    #[test]
    fn glyph_fill_rect_rounds_to_cells() {
        let mut s = GlyphSurface::new(4, 4);
        s.fill_rect(0.6, 0.0, 2.0, 1.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert!(s.texel(0, 0).is_transparent());
        assert_eq!(s.texel(1, 0).a, 1.0);
        assert_eq!(s.texel(2, 0).a, 1.0);
        assert!(s.texel(3, 0).is_transparent());
    }

    #[test]
    fn picture_line_is_antialiased_along_diagonal() {
        let mut s = PictureSurface::new(8, 8);
        s.draw_line(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0), 1.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert!(s.texel(4, 4).a > 0.3);
        assert!(s.texel(0, 7).is_transparent());
    }

    #[test]
    fn stroke_rect_leaves_interior_empty() {
        let mut s = PictureSurface::new(6, 6);
        s.stroke_rect(0.0, 0.0, 6.0, 6.0, 1.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert!(s.texel(0, 3).a > 0.99);
        assert!(s.texel(5, 3).a > 0.99);
        assert!(s.texel(3, 0).a > 0.99);
        assert!(s.texel(3, 3).is_transparent());
    }

    #[test]
    fn draw_pixmap_scales_and_applies_alpha() {
        let src = pixmap::filled(1, 1, Rgba::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        let mut s = PictureSurface::new(4, 4);
        s.draw_pixmap(&src, 1.0, 1.0, 2.0, 2.0, 0.25);
        assert!((s.texel(1, 1).a - 0.25).abs() < 1.0 / 255.0);
        assert!((s.texel(2, 2).a - 0.25).abs() < 1.0 / 255.0);
        assert!(s.texel(2, 2).r > 0.95);
        assert!(s.texel(0, 0).is_transparent());
        assert!(s.texel(3, 3).is_transparent());
    }

    #[test]
    fn gradient_follows_stops() {
        let mut s = PictureSurface::new(1, 10);
        s.fill_vertical_gradient(0.0, 0.0, 1.0, 10.0, Rgb::BLACK, &[(0.0, 1.0), (0.5, 1.0), (1.0, 0.0)]);
        assert!(s.texel(0, 2).a > 0.99);
        assert!(s.texel(0, 6).a > s.texel(0, 9).a);
        assert!(s.texel(0, 9).a > 0.0);
    }
}
