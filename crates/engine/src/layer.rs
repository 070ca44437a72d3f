//! Layers: ordered element lists with an optional scroll position.

use crate::core::ScrollAnimator;
use crate::element::{Element, ElementAction, FrameCtx};
use crate::overlay::{OverlayEvent, OverlayHost};
use crate::types::Vec2;

/// Typed handle to an element inside its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Per-frame input shared by every layer of a page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub dt: f32,
    /// Pointer position in cells, if the pointer is over the field.
    pub pointer: Option<Vec2>,
    /// Reported by the host; layers always update elements with `false`.
    pub pointer_down: bool,
    /// Scroll delta in cells (positive scrolls down).
    pub scroll_delta: f32,
}

impl FrameInput {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self
    }

    pub fn with_pointer(mut self, pointer: Option<Vec2>, down: bool) -> Self {
        self.pointer = pointer;
        self.pointer_down = down;
        self
    }

    /// The same frame with scrolling withheld.
    pub fn without_scroll(self) -> Self {
        self.with_scroll(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    name: &'static str,
    elements: Vec<Element>,
    scroll: Option<ScrollAnimator>,
}

impl Layer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            elements: Vec::new(),
            scroll: None,
        }
    }

    /// A layer whose elements scroll within `[0, max_scroll]` cells.
    pub fn scrollable(name: &'static str, max_scroll: f32) -> Self {
        Self {
            scroll: Some(ScrollAnimator::new(max_scroll)),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn add_element(&mut self, element: impl Into<Element>) -> ElementId {
        self.elements.push(element.into());
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn scroll(&self) -> Option<&ScrollAnimator> {
        self.scroll.as_ref()
    }

    /// Scroll, update every element, then draw them in order at `opacity`.
    ///
    /// Animated elements get no pointer; interactive ones get the pointer position but
    /// never a pressed state.
    pub fn update(&mut self, frame: &mut FrameCtx<'_>, input: &FrameInput, opacity: f32) {
        if let Some(scroll) = &mut self.scroll {
            scroll.apply_delta(input.scroll_delta);
            let offset = scroll.update(input.dt);
            for element in &mut self.elements {
                element.set_scroll_offset(offset);
            }
        }

        for element in &mut self.elements {
            let (animated, interactive) = {
                let base = element.base();
                (base.animated, base.interactive)
            };
            if animated {
                element.update(input.dt, None, false);
            } else if interactive {
                element.update(input.dt, input.pointer, false);
            }
        }

        self.draw(frame, opacity);
    }

    /// Draw every element in order at `opacity`, without updating.
    pub fn draw(&mut self, frame: &mut FrameCtx<'_>, opacity: f32) {
        for element in &mut self.elements {
            element.base_mut().opacity = opacity;
            element.draw(frame);
        }
    }

    /// Route an overlay event to the element owning its twin.
    ///
    /// Returns `None` when no element here owns the twin, `Some(action)` otherwise.
    pub fn handle_overlay(&mut self, event: &OverlayEvent) -> Option<Option<ElementAction>> {
        self.elements
            .iter_mut()
            .find(|e| e.owns_overlay(event.id))
            .map(|e| e.handle_overlay(event.kind))
    }

    pub fn fade_images(&mut self, to_glyphs: bool) {
        for element in &mut self.elements {
            element.fade_image(to_glyphs);
        }
    }

    /// Release every overlay twin. The layer can still draw afterwards.
    pub fn destroy(&mut self, overlay: &mut dyn OverlayHost) {
        for element in &mut self.elements {
            element.destroy(overlay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::test_support::field;
    use crate::element::{Button, TextBlock};
    use crate::overlay::{HeadlessOverlay, OverlayEventKind};
    use crate::types::Rgb;

    #[test]
    fn handles_are_stable_indices() {
        let mut layer = Layer::new("main");
        let a = layer.add_element(TextBlock::new("a", Vec2::ZERO));
        let b = layer.add_element(TextBlock::new("b", Vec2::ZERO));
        assert_ne!(a, b);
        layer
            .element_mut(b)
            .and_then(Element::as_text_mut)
            .unwrap()
            .set_text("bb");
        assert_eq!(layer.element(b).unwrap().base().size.x, 2.0);
    }

    #[test]
    fn opacity_is_injected_before_draw() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut layer = Layer::new("main");
        let id = layer.add_element(TextBlock::new("#", Vec2::ZERO));
        let mut frame = FrameCtx::new(&mut s, &field, &mut overlay);
        layer.update(&mut frame, &FrameInput::new(0.016), 0.25);
        assert_eq!(layer.element(id).unwrap().base().opacity, 0.25);
        assert_eq!(s.glyph.texel(0, 0).a, 0.25);
    }

    #[test]
    fn held_pointer_does_not_change_hover_outline() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut layer = Layer::new("nav");
        let button = Button::new(&mut overlay, "", "home", Vec2::ZERO, ElementAction::Navigate("/".into()));
        let twin = button.overlay_id().unwrap();
        layer.add_element(button);
        layer.handle_overlay(&OverlayEvent::new(twin, OverlayEventKind::Enter));

        let mut outline = Vec::new();
        for down in [true, false] {
            s.clear(Rgb::BLACK);
            let mut frame = FrameCtx::new(&mut s, &field, &mut overlay);
            layer.update(&mut frame, &FrameInput::new(0.016).with_pointer(Some(Vec2::ZERO), down), 1.0);
            outline.push(s.picture.texel(0, 0));
        }
        assert_eq!(outline[0], outline[1]);
        assert!((outline[0].r - 0.8).abs() < 0.01);
    }

    #[test]
    fn scroll_stays_within_range() {
        let (field, mut s) = field();
        let mut overlay = HeadlessOverlay::new();
        let mut layer = Layer::scrollable("grid", 12.0);
        for _ in 0..100 {
            let mut frame = FrameCtx::new(&mut s, &field, &mut overlay);
            layer.update(&mut frame, &FrameInput::new(0.016).with_scroll(3.0), 1.0);
            let offset = layer.scroll().unwrap().offset();
            assert!((0.0..=12.0).contains(&offset));
        }
        for _ in 0..100 {
            let mut frame = FrameCtx::new(&mut s, &field, &mut overlay);
            layer.update(&mut frame, &FrameInput::new(0.016).with_scroll(-5.0), 1.0);
            assert!(layer.scroll().unwrap().offset() >= 0.0);
        }
    }

    #[test]
    fn overlay_events_reach_the_owner() {
        let mut overlay = HeadlessOverlay::new();
        let mut layer = Layer::new("nav");
        layer.add_element(TextBlock::new("title", Vec2::ZERO));
        let button = Button::new(&mut overlay, "", "home", Vec2::ZERO, ElementAction::Navigate("/".into()));
        let twin = button.overlay_id().unwrap();
        layer.add_element(button);

        let click = OverlayEvent::new(twin, OverlayEventKind::Click);
        assert_eq!(layer.handle_overlay(&click), Some(Some(ElementAction::Navigate("/".into()))));

        layer.destroy(&mut overlay);
        assert!(overlay.is_empty());
        assert_eq!(layer.handle_overlay(&click), None);
    }
}
