use crate::types::Vec2;

use super::{ElementBase, FrameCtx};

/// Cells of fully opaque fill beyond the gradient's open edge.
const OCCLUSION_CELLS: f32 = 10.0;

/// `(t, alpha)` stops of a header fade, top to bottom.
const HEADER_FADE: [(f32, f32); 4] = [(0.0, 1.0), (0.3, 0.8), (0.7, 0.4), (1.0, 0.0)];

/// `(t, alpha)` stops of a footer fade, top to bottom.
const FOOTER_FADE: [(f32, f32); 2] = [(0.0, 0.0), (1.0, 1.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// Opaque above `position.y`, fading out over `size.y` cells below it.
    Top,
    /// Fading in over `size.y` cells above `position.y`, opaque below it.
    Bottom,
}

/// A band of scene background that hides content scrolled under a header or footer.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeGradient {
    pub base: ElementBase,
    direction: GradientDirection,
}

impl FadeGradient {
    pub fn new(position: Vec2, size: Vec2, direction: GradientDirection) -> Self {
        Self {
            base: ElementBase::new(position, size),
            direction,
        }
    }

    pub fn direction(&self) -> GradientDirection {
        self.direction
    }

    /// Glyph rows left fully visible by this gradient, as `[top, bottom)` in cells.
    pub fn visible_rows(&self, resolution_y: f32) -> (f32, f32) {
        match self.direction {
            GradientDirection::Top => (self.base.position.y + self.base.size.y, resolution_y),
            GradientDirection::Bottom => (0.0, self.base.position.y - self.base.size.y),
        }
    }

    pub fn draw(&self, frame: &mut FrameCtx<'_>) {
        let cell = frame.field.cell_size();
        let color = frame.field.background;
        let opacity = self.base.opacity;
        let x = self.base.position.x * cell.x;
        let w = self.base.size.x * cell.x;
        let y = self.base.position.y * cell.y;
        let h = self.base.size.y * cell.y;
        let occlusion = OCCLUSION_CELLS * cell.y;

        match self.direction {
            GradientDirection::Top => {
                frame
                    .picture
                    .fill_rect(x, y - occlusion, w, occlusion, color.with_alpha(opacity));
                let stops = HEADER_FADE.map(|(t, a)| (t, a * opacity));
                frame.picture.fill_vertical_gradient(x, y, w, h, color, &stops);
            }
            GradientDirection::Bottom => {
                let stops = FOOTER_FADE.map(|(t, a)| (t, a * opacity));
                frame.picture.fill_vertical_gradient(x, y - h, w, h, color, &stops);
                frame
                    .picture
                    .fill_rect(x, y, w, occlusion, color.with_alpha(opacity));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::test_support::{draw, field};
    use crate::element::Element;
    use crate::overlay::HeadlessOverlay;

    #[test]
    fn top_gradient_is_opaque_above_and_fades_below() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(FadeGradient::new(Vec2::new(0.0, 2.0), Vec2::new(20.0, 5.0), GradientDirection::Top));
        draw(&mut e, &field, &mut s, &mut overlay);
        // 2px cells: opaque rows 0..4, fade rows 4..14.
        assert!(s.picture.texel(5, 1).a > 0.99);
        let near = s.picture.texel(5, 4).a;
        let far = s.picture.texel(5, 13).a;
        assert!(near > far, "{near} <= {far}");
        assert!(s.picture.texel(5, 15).is_transparent());
    }

    #[test]
    fn bottom_gradient_fades_in_then_occludes() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(FadeGradient::new(Vec2::new(0.0, 8.0), Vec2::new(20.0, 3.0), GradientDirection::Bottom));
        draw(&mut e, &field, &mut s, &mut overlay);
        assert!(s.picture.texel(5, 9).is_transparent());
        assert!(s.picture.texel(5, 11).a < s.picture.texel(5, 15).a);
        assert!(s.picture.texel(5, 17).a > 0.99);
    }

    #[test]
    fn header_fade_eases_through_its_stops() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(FadeGradient::new(Vec2::ZERO, Vec2::new(20.0, 10.0), GradientDirection::Top));
        draw(&mut e, &field, &mut s, &mut overlay);
        // 20px band: t = 0.3 falls on row 6, t = 0.7 on row 14.
        assert!((s.picture.texel(5, 6).a - 0.8).abs() < 0.05);
        assert!((s.picture.texel(5, 14).a - 0.4).abs() < 0.05);
    }

    #[test]
    fn visible_rows() {
        let top = FadeGradient::new(Vec2::new(0.0, 2.0), Vec2::new(10.0, 5.0), GradientDirection::Top);
        assert_eq!(top.visible_rows(40.0), (7.0, 40.0));
        let bottom = FadeGradient::new(Vec2::new(0.0, 38.5), Vec2::new(10.0, 3.0), GradientDirection::Bottom);
        assert_eq!(bottom.visible_rows(40.0), (0.0, 35.5));
    }
}
