use crate::types::{Rgb, Rgba, Vec2};

use super::{draw_block, scale_rgb, ElementBase, FrameCtx};

/// A rectangle of glyph runs with a title set into its top edge.
///
/// ```text
/// TEAM ==========
/// =             =
/// =             =
/// ===============
/// ```
///
/// The bottom run sits on row `top + size.y`.
#[derive(Debug, Clone, PartialEq)]
pub struct TitledFrame {
    pub base: ElementBase,
    ch: char,
    title: String,
    title_len: f32,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl TitledFrame {
    pub fn new(ch: char, title: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        let title = title.into();
        let title_len = title.chars().count() as f32;
        Self {
            base: ElementBase::new(position, size),
            ch,
            title,
            title_len,
            left: position.x,
            top: position.y,
            right: position.x + size.x,
            bottom: position.y + size.y,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.base.color = color;
        self
    }

    /// `(left, top, right, bottom)` in cells.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.left, self.top, self.right, self.bottom)
    }

    pub fn draw(&self, frame: &mut FrameCtx<'_>) {
        let opacity = self.base.opacity;
        draw_block(
            frame.glyph,
            frame.picture,
            frame.field,
            &self.title,
            Vec2::new(self.left, self.top),
            self.base.color,
            Rgba::TRANSPARENT,
            opacity,
        );

        let alpha = opacity * frame.field.brightness.brightness(self.ch);
        let color = scale_rgb(self.base.color, opacity).with_alpha(alpha);
        let width = self.right - self.left;
        let height = self.bottom - self.top;

        let after_title = self.title_len + 1.0;
        frame
            .glyph
            .fill_rect(self.left + after_title, self.top, width - after_title, 1.0, color);
        frame.glyph.fill_rect(self.left, self.bottom, width, 1.0, color);
        frame.glyph.fill_rect(self.left, self.top + 1.0, 1.0, height - 1.0, color);
        frame
            .glyph
            .fill_rect(self.right - 1.0, self.top + 1.0, 1.0, height - 1.0, color);
    }
}

/// Faint border around the whole glyph surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenFrame {
    pub base: ElementBase,
    ch: char,
}

impl ScreenFrame {
    /// Fraction of the glyph brightness used for the border.
    pub const FAINT: f32 = 0.3;

    pub fn new(ch: char) -> Self {
        Self {
            base: ElementBase::new(Vec2::ZERO, Vec2::ONE),
            ch,
        }
    }

    pub fn draw(&self, frame: &mut FrameCtx<'_>) {
        let (w, h) = frame.glyph.resolution();
        let (w, h) = (w as f32, h as f32);
        let opacity = self.base.opacity;
        let alpha = frame.field.brightness.brightness(self.ch) * Self::FAINT * opacity;
        let color = scale_rgb(self.base.color, opacity).with_alpha(alpha);

        frame.glyph.fill_rect(0.0, 0.0, w, 1.0, color);
        frame.glyph.fill_rect(0.0, h - 1.0, w, 1.0, color);
        frame.glyph.fill_rect(0.0, 1.0, 1.0, h - 2.0, color);
        frame.glyph.fill_rect(w - 1.0, 1.0, 1.0, h - 2.0, color);
    }
}
