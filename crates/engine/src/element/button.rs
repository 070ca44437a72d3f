use crate::overlay::{OverlayEventKind, OverlayHost, OverlayId};
use crate::types::{HorizontalAlign, Rgb, Rgba, Vec2, VerticalAlign};
use crate::core::block_size;

use super::{draw_block, ElementAction, ElementBase, FrameCtx};

/// A text block with an overlay twin.
///
/// Hovering outlines the button on the picture surface; clicking yields its action.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub base: ElementBase,
    text: String,
    action: ElementAction,
    twin: Option<OverlayId>,
    hovered: bool,
    pressed: bool,
}

impl Button {
    /// Create the button and its twin. `label` is the twin's accessible name; an empty
    /// label falls back to the trimmed text.
    pub fn new(
        overlay: &mut dyn OverlayHost,
        label: &str,
        text: impl Into<String>,
        position: Vec2,
        action: ElementAction,
    ) -> Self {
        let text = text.into();
        let label = if label.is_empty() { text.trim() } else { label };
        let twin = overlay.create(label);
        let mut base = ElementBase::new(position, block_size(&text));
        base.interactive = true;
        Self {
            base,
            text,
            action,
            twin: Some(twin),
            hovered: false,
            pressed: false,
        }
    }

    /// Override the measured size, e.g. an invisible button covering a card.
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.base.size = size;
        self
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

    pub fn action(&self) -> &ElementAction {
        &self.action
    }

    pub fn overlay_id(&self) -> Option<OverlayId> {
        self.twin
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn update(&mut self, _pointer: Option<Vec2>, pointer_down: bool) {
        self.pressed = self.hovered && pointer_down;
    }

    pub fn handle_overlay(&mut self, kind: OverlayEventKind) -> Option<ElementAction> {
        match kind {
            OverlayEventKind::Enter => {
                self.hovered = true;
                None
            }
            OverlayEventKind::Leave => {
                self.hovered = false;
                self.pressed = false;
                None
            }
            OverlayEventKind::Click => Some(self.action.clone()),
        }
    }

    pub fn draw(&self, frame: &mut FrameCtx<'_>) {
        if let Some(id) = self.twin {
            let rect = frame.field.coords.overlay_rect(self.base.position, self.base.size);
            frame.overlay.place(id, rect);
        }

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

        if self.hovered {
            let cell = frame.field.cell_size();
            let origin = self.base.position.scale(cell);
            let extent = self.base.size.scale(cell);
            let alpha = if self.pressed { 1.0 } else { 0.8 } * self.base.opacity;
            frame.picture.stroke_rect(
                origin.x,
                origin.y,
                extent.x,
                extent.y,
                1.0,
                self.base.color.with_alpha(alpha),
            );
        }
    }

    pub fn destroy(&mut self, overlay: &mut dyn OverlayHost) {
        if let Some(id) = self.twin.take() {
            overlay.remove(id);
        }
        self.hovered = false;
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::test_support::{draw, field};
    use crate::element::Element;
    use crate::overlay::HeadlessOverlay;

    fn button(overlay: &mut HeadlessOverlay) -> Button {
        Button::new(overlay, "", " work ", Vec2::new(2.0, 3.0), ElementAction::Navigate("/work".into()))
    }

    #[test]
    fn twin_is_created_with_trimmed_label() {
        let mut overlay = HeadlessOverlay::new();
        let b = button(&mut overlay);
        let id = b.overlay_id().unwrap();
        assert_eq!(overlay.entry(id).map(|e| e.label.as_str()), Some("work"));
        assert_eq!(b.base.size, Vec2::new(6.0, 1.0));
    }

    #[test]
    fn draw_places_twin_in_viewport_pixels() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(button(&mut overlay));
        draw(&mut e, &field, &mut s, &mut overlay);
        let id = overlay.entries()[0].id;
        let rect = overlay.entry(id).and_then(|e| e.rect).unwrap();
        // 2px cells at ratio 1.
        assert_eq!((rect.left, rect.top, rect.width, rect.height), (4.0, 6.0, 12.0, 2.0));
    }

    #[test]
    fn click_yields_action_and_hover_outlines() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut e = Element::from(button(&mut overlay));
        assert_eq!(e.handle_overlay(OverlayEventKind::Enter), None);
        assert_eq!(
            e.handle_overlay(OverlayEventKind::Click),
            Some(ElementAction::Navigate("/work".into()))
        );
        draw(&mut e, &field, &mut s, &mut overlay);
        // Top-left corner of the outline in device pixels.
        assert!(s.picture.texel(4, 6).a > 0.0);
        // Right of the button stays clear.
        assert!(s.picture.texel(20, 6).is_transparent());
    }

    #[test]
    fn destroy_removes_twin_once() {
        let mut overlay = HeadlessOverlay::new();
        let mut b = button(&mut overlay);
        b.destroy(&mut overlay);
        assert!(overlay.is_empty());
        assert_eq!(b.overlay_id(), None);
        b.destroy(&mut overlay);
    }
}
