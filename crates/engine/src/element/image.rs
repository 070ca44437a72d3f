use crate::assets::ImageSlot;
use crate::core::pixmap::{self, Sampling};
use crate::core::FadeAnimator;
use crate::types::Vec2;

use super::{ElementBase, FrameCtx};

/// A raster image shown as a crossfade between two renditions.
///
/// `d` (glyph dominance, animated) selects the mix: the picture surface receives the
/// image with alpha `(1 - d) * opacity`, the glyph surface a cell-resampled copy with
/// alpha `luma * d * opacity`. Nothing is drawn until the image slot is filled.
#[derive(Debug, Clone)]
pub struct ImageElement {
    pub base: ElementBase,
    slot: Option<ImageSlot>,
    fade: FadeAnimator,
    scroll_offset: f32,
    clip: Option<(f32, f32)>,
}

impl ImageElement {
    pub fn new(slot: Option<ImageSlot>, position: Vec2, size: Vec2) -> Self {
        let mut base = ElementBase::new(position, size);
        base.animated = true;
        Self {
            base,
            slot,
            fade: FadeAnimator::default(),
            scroll_offset: 0.0,
            clip: None,
        }
    }

    pub fn with_fade(mut self, fade: FadeAnimator) -> Self {
        self.fade = fade;
        self
    }

    /// Only glyph rows in `[top, bottom)` are drawn.
    pub fn with_clip(mut self, top: f32, bottom: f32) -> Self {
        self.clip = Some((top, bottom));
        self
    }

    pub fn set_clip(&mut self, clip: Option<(f32, f32)>) {
        self.clip = clip;
    }

    pub fn set_slot(&mut self, slot: Option<ImageSlot>) {
        self.slot = slot;
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.as_ref().is_some_and(|s| s.get().is_some())
    }

    /// Current glyph dominance, 1 = glyph rendition, 0 = picture.
    pub fn dominance(&self) -> f32 {
        self.fade.value()
    }

    pub fn fade_to(&mut self, target: f32) {
        self.fade.fade_to(target.clamp(0.0, 1.0));
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    pub fn update(&mut self, dt: f32) {
        self.fade.update(dt);
    }

    pub fn draw(&self, frame: &mut FrameCtx<'_>) {
        let Some(image) = self.slot.as_ref().and_then(|s| s.get()) else {
            return;
        };
        let opacity = self.base.opacity;
        let d = self.fade.value();
        let pos = Vec2::new(self.base.position.x, self.base.position.y - self.scroll_offset);
        let size = self.base.size;
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }

        let picture_alpha = (1.0 - d) * opacity;
        if picture_alpha > 0.0 {
            let cell = frame.field.cell_size();
            let origin = pos.scale(cell);
            let extent = size.scale(cell);
            frame
                .picture
                .draw_pixmap(image, origin.x, origin.y, extent.x, extent.y, picture_alpha);
        }

        let glyph_alpha = d * opacity;
        if glyph_alpha <= 0.0 {
            return;
        }
        let (mut y0, mut y1) = (pos.y.round(), (pos.y + size.y).round());
        if let Some((top, bottom)) = self.clip {
            y0 = y0.max(top.ceil());
            y1 = y1.min(bottom.floor());
        }
        let (x0, x1) = (pos.x.round(), (pos.x + size.x).round());
        let (x0, x1, y0, y1) = (x0 as i32, x1 as i32, y0 as i32, y1 as i32);

        for cy in y0..y1 {
            let v = (cy as f32 + 0.5 - pos.y) / size.y;
            for cx in x0..x1 {
                let u = (cx as f32 + 0.5 - pos.x) / size.x;
                let sample = pixmap::sample(image, u, v, Sampling::Bilinear);
                let rgb = sample.rgb();
                let alpha = rgb.luma() * sample.a * glyph_alpha;
                frame.glyph.put_texel(cx, cy, rgb.with_alpha(alpha));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use super::*;
    use crate::core::pixmap;
    use crate::element::test_support::{draw, field};
    use crate::element::Element;
    use crate::overlay::HeadlessOverlay;
    use crate::types::Rgba;

    fn white_slot() -> ImageSlot {
        let slot = Arc::new(OnceLock::new());
        let _ = slot.set(pixmap::filled(4, 4, Rgba::new(1.0, 1.0, 1.0, 1.0)).unwrap());
        slot
    }

    #[test]
    fn empty_slot_draws_nothing() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(ImageElement::new(Some(Arc::new(OnceLock::new())), Vec2::ZERO, Vec2::new(4.0, 4.0)));
        draw(&mut e, &field, &mut s, &mut overlay);
        assert!(s.glyph.is_clear());
        assert!(s.picture.is_clear());
    }

    #[test]
    fn glyph_dominant_image_draws_only_glyphs() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(ImageElement::new(Some(white_slot()), Vec2::new(1.0, 1.0), Vec2::new(3.0, 2.0)));
        draw(&mut e, &field, &mut s, &mut overlay);
        assert!((s.glyph.texel(1, 1).a - 1.0).abs() < 1e-5);
        assert!(s.glyph.texel(3, 2).a > 0.99);
        assert!(s.glyph.texel(4, 1).is_transparent());
        assert!(s.picture.is_clear());
    }

    #[test]
    fn fade_crossfades_to_picture() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut img = ImageElement::new(Some(white_slot()), Vec2::new(1.0, 1.0), Vec2::new(3.0, 2.0));
        img.fade_to(0.0);
        img.update(0.5);
        let d = img.dominance();
        assert!(d > 0.0 && d < 1.0);
        img.update(1.0);
        assert_eq!(img.dominance(), 0.0);

        let mut e = Element::from(img);
        draw(&mut e, &field, &mut s, &mut overlay);
        assert!(s.glyph.texel(1, 1).is_transparent());
        assert!(s.picture.texel(3, 3).a > 0.99);
    }

    #[test]
    fn scroll_and_clip_limit_rows() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut img = ImageElement::new(Some(white_slot()), Vec2::new(0.0, 4.0), Vec2::new(2.0, 4.0)).with_clip(3.0, 5.0);
        img.set_scroll_offset(2.0);
        let mut e = Element::from(img);
        draw(&mut e, &field, &mut s, &mut overlay);
        // Scrolled rows 2..6, clipped to 3..5.
        assert!(s.glyph.texel(0, 2).is_transparent());
        assert!(s.glyph.texel(0, 3).a > 0.99);
        assert!(s.glyph.texel(0, 4).a > 0.99);
        assert!(s.glyph.texel(0, 5).is_transparent());
    }
}
