//! Page lifecycle: one current page, at most one incoming page, and fixed layers drawn
//! above both.
//!
//! A navigation starts the current page's fade-out and releases its overlay twins at
//! once. The incoming page fades in alongside it and receives the scroll input. When
//! the fade-out completes the incoming page becomes current and the old one is dropped.

use crate::element::{ElementAction, FrameCtx};
use crate::layer::{FrameInput, Layer};
use crate::overlay::{OverlayEvent, OverlayHost};
use crate::page::Page;
use crate::types::{DEFAULT_FADE_SPEED, FIRST_PAGE_FADE_SPEED};

#[derive(Debug, Default)]
pub struct PageManager {
    current: Option<Page>,
    next: Option<Page>,
    fixed: Vec<Layer>,
}

impl PageManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Page> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Page> {
        self.next.as_ref()
    }

    pub fn fixed_layers(&self) -> &[Layer] {
        &self.fixed
    }

    pub fn is_transitioning(&self) -> bool {
        self.next.is_some()
    }

    /// Add a layer drawn above every page at full opacity.
    pub fn add_fixed_layer(&mut self, layer: Layer) {
        self.fixed.push(layer);
    }

    /// Show `page`. The very first page fades in slower; later pages cross-fade with
    /// the current one. A page still waiting to become current is discarded.
    pub fn navigate(&mut self, mut page: Page, overlay: &mut dyn OverlayHost) {
        if self.current.is_none() {
            page.reset_fade(0.0, 1.0, FIRST_PAGE_FADE_SPEED);
            tracing::info!(page = page.name(), "showing first page");
            self.current = Some(page);
            return;
        }
        let Some(current) = self.current.as_mut() else {
            return;
        };

        current.begin_exit();
        current.destroy(overlay);
        if let Some(mut pending) = self.next.take() {
            tracing::debug!(page = pending.name(), "replacing pending page");
            pending.destroy(overlay);
        }
        page.reset_fade(0.0, 1.0, DEFAULT_FADE_SPEED);
        tracing::debug!(from = current.name(), to = page.name(), "navigating");
        self.next = Some(page);
    }

    /// Tick and draw every page, then the fixed layers.
    ///
    /// The current page only scrolls while no other page is incoming.
    pub fn update(&mut self, frame: &mut FrameCtx<'_>, input: &FrameInput) {
        let still = input.without_scroll();

        let completed = match &mut self.current {
            Some(current) if self.next.is_some() => current.tick(frame, &still),
            Some(current) => current.tick(frame, input),
            None => false,
        };
        if let Some(next) = &mut self.next {
            next.tick(frame, input);
        }

        for layer in &mut self.fixed {
            layer.update(frame, &still, 1.0);
        }

        if completed && self.next.is_some() {
            let old = std::mem::replace(&mut self.current, self.next.take());
            if let Some(mut old) = old {
                old.destroy(frame.overlay);
                tracing::info!(
                    from = old.name(),
                    to = self.current.as_ref().map(Page::name).unwrap_or(""),
                    "page transition complete"
                );
            }
        }
    }

    /// Route an overlay event to whoever owns the twin: fixed layers first, then the
    /// incoming page, then the current one.
    pub fn dispatch(&mut self, event: &OverlayEvent) -> Option<ElementAction> {
        if let Some(action) = self.fixed.iter_mut().find_map(|l| l.handle_overlay(event)) {
            return action;
        }
        if let Some(action) = self.next.as_mut().and_then(|p| p.handle_overlay(event)) {
            return action;
        }
        self.current.as_mut().and_then(|p| p.handle_overlay(event)).flatten()
    }

    /// Fade every image toward glyphs (`true`) or pictures (`false`).
    pub fn fade_images(&mut self, to_glyphs: bool) {
        for page in self.current.iter_mut().chain(self.next.iter_mut()) {
            page.fade_images(to_glyphs);
        }
    }

    /// Drop every page and fixed layer, releasing their twins.
    pub fn clear(&mut self, overlay: &mut dyn OverlayHost) {
        for mut page in self.current.take().into_iter().chain(self.next.take()) {
            page.destroy(overlay);
        }
        for mut layer in self.fixed.drain(..) {
            layer.destroy(overlay);
        }
    }
}
