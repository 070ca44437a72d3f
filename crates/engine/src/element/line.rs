use crate::types::{Rgb, Vec2};

use super::{scale_rgb, ElementBase, FrameCtx};

/// A stroked segment on the glyph surface.
///
/// Endpoints are cell indices; the stroke runs through cell centers with the brightness
/// of `ch` as its alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub base: ElementBase,
    ch: char,
    from: Vec2,
    to: Vec2,
    width: f32,
}

impl Line {
    pub fn new(ch: char, from: Vec2, to: Vec2, width: f32) -> Self {
        let min = Vec2::new(from.x.min(to.x), from.y.min(to.y));
        let size = Vec2::new((from.x - to.x).abs() + 1.0, (from.y - to.y).abs() + 1.0);
        Self {
            base: ElementBase::new(min, size),
            ch,
            from,
            to,
            width,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.base.color = color;
        self
    }

    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (self.from, self.to)
    }

    pub fn draw(&self, frame: &mut FrameCtx<'_>) {
        let opacity = self.base.opacity;
        let alpha = frame.field.brightness.brightness(self.ch) * opacity;
        let color = scale_rgb(self.base.color, opacity).with_alpha(alpha);
        let half = Vec2::splat(0.5);
        frame
            .glyph
            .draw_line(self.from + half, self.to + half, self.width, color);
    }
}
