use crate::core::{block_size, wrap_text};
use crate::types::{HorizontalAlign, Rgb, Rgba, Vec2, VerticalAlign};

use super::{draw_block, ElementBase, FrameCtx};

/// A multi-line block of glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub base: ElementBase,
    text: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, position: Vec2) -> Self {
        let text = text.into();
        let size = block_size(&text);
        Self {
            base: ElementBase::new(position, size),
            text,
        }
    }

    /// Word-wrap `text` at `max_width` columns before measuring it.
    pub fn wrapped(text: &str, max_width: usize, position: Vec2) -> Self {
        Self::new(wrap_text(text, max_width), position)
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.base.color = color;
        self
    }

    pub fn with_background(mut self, background: Rgba) -> Self {
        self.base.background = background;
        self
    }

    pub fn aligned(mut self, h: HorizontalAlign, v: VerticalAlign, resolution: Vec2) -> Self {
        self.base.align(h, v, resolution);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text in place, reusing the buffer. The position is kept.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.base.size = block_size(&self.text);
    }

    pub fn draw(&self, frame: &mut FrameCtx<'_>) {
        draw_block(
            frame.glyph,
            frame.picture,
            frame.field,
            &self.text,
            self.base.position,
            self.base.color,
            self.base.background,
            self.base.opacity,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::test_support::{draw, field};
    use crate::element::Element;
    use crate::overlay::HeadlessOverlay;

    #[test]
    fn size_follows_text() {
        let t = TextBlock::new("ab\nabcd", Vec2::ZERO);
        assert_eq!(t.base.size, Vec2::new(4.0, 2.0));
        assert_eq!(TextBlock::new("", Vec2::ZERO).base.size, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn center_alignment_offsets_once() {
        let t = TextBlock::new("0123456789", Vec2::new(1.0, 0.0)).aligned(
            HorizontalAlign::Center,
            VerticalAlign::Start,
            Vec2::new(50.0, 20.0),
        );
        assert_eq!(t.base.position.x, 21.0);
    }

    #[test]
    fn end_alignment_may_go_negative() {
        let t = TextBlock::new("x", Vec2::new(-4.0, -4.0)).aligned(
            HorizontalAlign::End,
            VerticalAlign::End,
            Vec2::new(20.0, 10.0),
        );
        assert_eq!(t.base.position, Vec2::new(15.0, 5.0));
        let t = TextBlock::new("wider than the surface", Vec2::ZERO).aligned(
            HorizontalAlign::End,
            VerticalAlign::Start,
            Vec2::new(10.0, 10.0),
        );
        assert!(t.base.position.x < 0.0);
    }

    #[test]
    fn wrapped_block_respects_width() {
        let t = TextBlock::wrapped("one two three four", 9, Vec2::ZERO);
        assert_eq!(t.text(), "one two\nthree\nfour");
        assert!(t.base.size.x <= 9.0);
    }

    #[test]
    fn set_text_remeasures() {
        let mut t = TextBlock::new("01/03", Vec2::new(2.0, 2.0));
        t.set_text("02/03\n");
        assert_eq!(t.base.size, Vec2::new(5.0, 2.0));
        assert_eq!(t.base.position, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn draws_through_element() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(TextBlock::new("#", Vec2::new(5.0, 5.0)));
        draw(&mut e, &field, &mut s, &mut overlay);
        assert_eq!(s.glyph.texel(5, 5).a, 1.0);
    }
}
