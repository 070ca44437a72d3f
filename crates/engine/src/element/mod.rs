//! Drawable elements.
//!
//! Every element carries an [`ElementBase`] and implements the same small contract,
//! dispatched through the [`Element`] enum:
//!
//! | Method | Effect |
//! |--------|--------|
//! | `update(dt, pointer, pointer_down)` | advance animations and hover state |
//! | `draw(frame)` | paint into the glyph and picture surfaces, re-place overlay twins |
//! | `handle_overlay(kind)` | react to enter/leave/click on the element's twin |
//! | `destroy(overlay)` | release overlay twins |
//!
//! Positions and sizes are in cells. The glyph surface is addressed in cells, the picture
//! surface in device pixels (`cell * cell_size`).

mod button;
mod card;
mod frame;
mod gradient;
mod image;
mod line;
mod text;

pub use button::Button;
pub use card::{TeamMemberCard, WorkCard};
pub use frame::{ScreenFrame, TitledFrame};
pub use gradient::{FadeGradient, GradientDirection};
pub use image::ImageElement;
pub use line::Line;
pub use text::TextBlock;

use crate::context::FieldContext;
use crate::core::{align_offset, GlyphSurface, PictureSurface, Surfaces};
use crate::overlay::{OverlayEventKind, OverlayHost, OverlayId};
use crate::types::{HorizontalAlign, Rgb, Rgba, Vec2, VerticalAlign};

/// What a click on an interactive element asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementAction {
    /// Route to an in-app path such as `/work/signal`.
    Navigate(String),
    /// Open a link outside the field.
    OpenExternal(String),
    /// Move the media viewer by this many items.
    MediaStep(i32),
}

/// Attributes shared by every element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBase {
    pub position: Vec2,
    pub size: Vec2,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Glyph ink color.
    pub color: Rgb,
    /// Fill behind each glyph cell; zero alpha draws nothing.
    pub background: Rgba,
    /// Injected by the owning layer every frame.
    pub opacity: f32,
    pub interactive: bool,
    pub animated: bool,
    pub needs_update: bool,
}

impl ElementBase {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            horizontal_align: HorizontalAlign::Start,
            vertical_align: VerticalAlign::Start,
            color: Rgb::WHITE,
            background: Rgba::TRANSPARENT,
            opacity: 1.0,
            interactive: false,
            animated: false,
            needs_update: false,
        }
    }

    /// Offset the position by the alignment against `resolution`.
    ///
    /// Only called from element constructors, so it is applied once per element.
    pub(crate) fn align(&mut self, h: HorizontalAlign, v: VerticalAlign, resolution: Vec2) {
        self.horizontal_align = h;
        self.vertical_align = v;
        self.position += align_offset(h, v, resolution, self.size);
    }
}

/// Mutable view of everything a draw call may touch.
pub struct FrameCtx<'a> {
    pub glyph: &'a mut GlyphSurface,
    pub picture: &'a mut PictureSurface,
    pub field: &'a FieldContext,
    pub overlay: &'a mut dyn OverlayHost,
}

impl<'a> FrameCtx<'a> {
    pub fn new(surfaces: &'a mut Surfaces, field: &'a FieldContext, overlay: &'a mut dyn OverlayHost) -> Self {
        Self {
            glyph: &mut surfaces.glyph,
            picture: &mut surfaces.picture,
            field,
            overlay,
        }
    }
}

#[inline]
pub(crate) fn scale_rgb(c: Rgb, k: f32) -> Rgb {
    Rgb::new(c.r * k, c.g * k, c.b * k)
}

/// Paint one background cell on the picture surface, replacing what was there.
pub fn draw_background_cell(picture: &mut PictureSurface, cell_size: Vec2, cell: Vec2, background: Rgba, opacity: f32) {
    let x = cell.x * cell_size.x;
    let y = cell.y * cell_size.y;
    picture.clear_rect(x, y, cell_size.x, cell_size.y);
    let color = scale_rgb(background.rgb(), opacity).with_alpha(background.a * opacity);
    picture.fill_rect(x, y, cell_size.x, cell_size.y, color);
}

/// Paint a text block starting at `origin`.
///
/// For every character except `\n`: the background cell (when its alpha is non-zero),
/// then a glyph texel with alpha `brightness(ch) * opacity`. Characters outside the
/// alphabet draw no glyph. `\n` moves to the next row and back to `origin.x`.
pub fn draw_block(
    glyph: &mut GlyphSurface,
    picture: &mut PictureSurface,
    field: &FieldContext,
    text: &str,
    origin: Vec2,
    color: Rgb,
    background: Rgba,
    opacity: f32,
) {
    let cell_size = field.cell_size();
    let ink = scale_rgb(color, opacity);
    let mut x = origin.x;
    let mut y = origin.y;

    for ch in text.chars() {
        if ch == '\n' {
            y += 1.0;
            x = origin.x;
            continue;
        }
        if background.a != 0.0 {
            draw_background_cell(picture, cell_size, Vec2::new(x, y), background, opacity);
        }
        if let Some(b) = field.brightness.get(ch) {
            glyph.put_texel(x.round() as i32, y.round() as i32, ink.with_alpha(b * opacity));
        }
        x += 1.0;
    }
}

#[derive(Debug, Clone)]
pub enum Element {
    Text(TextBlock),
    Line(Line),
    TitledFrame(TitledFrame),
    ScreenFrame(ScreenFrame),
    Button(Button),
    Image(ImageElement),
    WorkCard(WorkCard),
    TeamCard(TeamMemberCard),
    Gradient(FadeGradient),
}

impl Element {
    pub fn base(&self) -> &ElementBase {
        match self {
            Element::Text(e) => &e.base,
            Element::Line(e) => &e.base,
            Element::TitledFrame(e) => &e.base,
            Element::ScreenFrame(e) => &e.base,
            Element::Button(e) => &e.base,
            Element::Image(e) => &e.base,
            Element::WorkCard(e) => &e.base,
            Element::TeamCard(e) => &e.base,
            Element::Gradient(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            Element::Text(e) => &mut e.base,
            Element::Line(e) => &mut e.base,
            Element::TitledFrame(e) => &mut e.base,
            Element::ScreenFrame(e) => &mut e.base,
            Element::Button(e) => &mut e.base,
            Element::Image(e) => &mut e.base,
            Element::WorkCard(e) => &mut e.base,
            Element::TeamCard(e) => &mut e.base,
            Element::Gradient(e) => &mut e.base,
        }
    }

    pub fn update(&mut self, dt: f32, pointer: Option<Vec2>, pointer_down: bool) {
        match self {
            Element::Image(e) => e.update(dt),
            Element::WorkCard(e) => e.update(dt),
            Element::Button(e) => e.update(pointer, pointer_down),
            Element::TeamCard(e) => e.update(pointer, pointer_down),
            Element::Text(_)
            | Element::Line(_)
            | Element::TitledFrame(_)
            | Element::ScreenFrame(_)
            | Element::Gradient(_) => {}
        }
    }

    pub fn draw(&mut self, frame: &mut FrameCtx<'_>) {
        match self {
            Element::Text(e) => e.draw(frame),
            Element::Line(e) => e.draw(frame),
            Element::TitledFrame(e) => e.draw(frame),
            Element::ScreenFrame(e) => e.draw(frame),
            Element::Button(e) => e.draw(frame),
            Element::Image(e) => e.draw(frame),
            Element::WorkCard(e) => e.draw(frame),
            Element::TeamCard(e) => e.draw(frame),
            Element::Gradient(e) => e.draw(frame),
        }
    }

    /// Whether `id` belongs to this element.
    pub fn owns_overlay(&self, id: OverlayId) -> bool {
        match self {
            Element::Button(e) => e.overlay_id() == Some(id),
            Element::WorkCard(e) => e.overlay_id() == Some(id),
            Element::TeamCard(e) => e.overlay_id() == Some(id),
            _ => false,
        }
    }

    pub fn handle_overlay(&mut self, kind: OverlayEventKind) -> Option<ElementAction> {
        match self {
            Element::Button(e) => e.handle_overlay(kind),
            Element::WorkCard(e) => e.handle_overlay(kind),
            Element::TeamCard(e) => e.handle_overlay(kind),
            _ => None,
        }
    }

    /// Forward a layer scroll offset (cells) to elements that scroll.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        match self {
            Element::Image(e) => e.set_scroll_offset(offset),
            Element::WorkCard(e) => e.set_scroll_offset(offset),
            _ => {}
        }
    }

    /// Fade any image toward its glyph rendition (`true`) or full picture (`false`).
    pub fn fade_image(&mut self, to_glyphs: bool) {
        let target = if to_glyphs { 1.0 } else { 0.0 };
        match self {
            Element::Image(e) => e.fade_to(target),
            Element::WorkCard(e) => e.image_mut().fade_to(target),
            _ => {}
        }
    }

    pub fn destroy(&mut self, overlay: &mut dyn OverlayHost) {
        match self {
            Element::Button(e) => e.destroy(overlay),
            Element::WorkCard(e) => e.destroy(overlay),
            Element::TeamCard(e) => e.destroy(overlay),
            _ => {}
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextBlock> {
        match self {
            Element::Text(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageElement> {
        match self {
            Element::Image(e) => Some(e),
            _ => None,
        }
    }
}

macro_rules! element_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(e: $ty) -> Self {
                    Element::$variant(e)
                }
            }
        )*
    };
}

element_from! {
    TextBlock => Text,
    Line => Line,
    TitledFrame => TitledFrame,
    ScreenFrame => ScreenFrame,
    Button => Button,
    ImageElement => Image,
    WorkCard => WorkCard,
    TeamMemberCard => TeamCard,
    FadeGradient => Gradient,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::{recreate, BrightnessMap, SurfaceConfig};
    use crate::overlay::HeadlessOverlay;

    /// 20x10 cells at 2px per cell.
    pub fn field() -> (FieldContext, Surfaces) {
        let config = SurfaceConfig::new(40, 20, 1.0, 2);
        let field = FieldContext::new(BrightnessMap::new(" .:#"), config.coordinate_system(), false);
        (field, recreate(&config))
    }

    pub fn draw(element: &mut Element, field: &FieldContext, surfaces: &mut Surfaces, overlay: &mut HeadlessOverlay) {
        let mut frame = FrameCtx::new(surfaces, field, overlay);
        element.draw(&mut frame);
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::field;
    use super::*;

    #[test]
    fn block_draws_glyph_alpha_from_brightness() {
        let (field, mut s) = field();
        draw_block(&mut s.glyph, &mut s.picture, &field, "#.", Vec2::new(1.0, 2.0), Rgb::WHITE, Rgba::TRANSPARENT, 1.0);
        assert_eq!(s.glyph.texel(1, 2).a, 1.0);
        assert!((s.glyph.texel(2, 2).a - 1.0 / 3.0).abs() < 1e-6);
        assert!(s.picture.texel(2, 4).is_transparent());
    }

    #[test]
    fn newline_returns_to_origin_column() {
        let (field, mut s) = field();
        draw_block(&mut s.glyph, &mut s.picture, &field, "##\n#", Vec2::new(3.0, 0.0), Rgb::WHITE, Rgba::TRANSPARENT, 1.0);
        assert_eq!(s.glyph.texel(3, 1).a, 1.0);
        assert!(s.glyph.texel(4, 1).is_transparent());
    }

    #[test]
    fn unknown_char_still_draws_background() {
        let (field, mut s) = field();
        let bg = Rgba::new(1.0, 0.0, 0.0, 0.5);
        draw_block(&mut s.glyph, &mut s.picture, &field, "Z", Vec2::new(0.0, 0.0), Rgb::WHITE, bg, 1.0);
        assert!(s.glyph.texel(0, 0).is_transparent());
        let px = s.picture.texel(1, 1);
        assert!((px.a - 0.5).abs() < 1.0 / 255.0);
        // Outside the 2x2 pixel cell nothing changes.
        assert!(s.picture.texel(2, 0).is_transparent());
    }

    #[test]
    fn background_cell_replaces_previous_fill() {
        let (field, mut s) = field();
        let cell = field.cell_size();
        draw_background_cell(&mut s.picture, cell, Vec2::ZERO, Rgba::new(0.0, 0.0, 1.0, 1.0), 1.0);
        draw_background_cell(&mut s.picture, cell, Vec2::ZERO, Rgba::new(1.0, 0.0, 0.0, 0.25), 1.0);
        let px = s.picture.texel(0, 0);
        assert!((px.a - 0.25).abs() < 1.0 / 255.0);
        assert_eq!(px.b, 0.0);
    }

    #[test]
    fn opacity_scales_ink_and_alpha() {
        let (field, mut s) = field();
        draw_block(&mut s.glyph, &mut s.picture, &field, "#", Vec2::ZERO, Rgb::WHITE, Rgba::TRANSPARENT, 0.5);
        let t = s.glyph.texel(0, 0);
        assert_eq!(t.a, 0.5);
        assert_eq!(t.r, 0.5);
    }
}
