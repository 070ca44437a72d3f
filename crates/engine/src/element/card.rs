use crate::assets::ImageSlot;
use crate::content::{Person, Tag, Work};
use crate::core::OverlayRect;
use crate::overlay::{OverlayEventKind, OverlayHost, OverlayId};
use crate::types::{Rgb, Rgba, Vec2};

use super::{draw_block, Button, ElementAction, ElementBase, FrameCtx, ImageElement, TextBlock};

/// Highlight padding around a hovered card, device pixels.
const HOVER_PADDING: f32 = 10.0;
const HOVER_COLOR: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.8);

#[derive(Debug, Clone, PartialEq)]
struct TagChip {
    label: String,
    color: Rgb,
}

/// A works-grid card: thumbnail, title label, tag chips and an overlay link to the
/// work's detail page.
///
/// The card scrolls with its layer; the twin is re-placed every frame from
/// `position - scroll_offset`, clipped to the visible band so hidden cards never steal
/// clicks from the header.
#[derive(Debug, Clone)]
pub struct WorkCard {
    pub base: ElementBase,
    route: String,
    label: String,
    tags: Vec<TagChip>,
    image: ImageElement,
    twin: Option<OverlayId>,
    hovered: bool,
    scroll_offset: f32,
    clip: Option<(f32, f32)>,
}

impl WorkCard {
    pub fn new(
        overlay: &mut dyn OverlayHost,
        work: &Work,
        tags: &[&Tag],
        thumbnail: Option<ImageSlot>,
        position: Vec2,
        size: Vec2,
    ) -> Self {
        let twin = overlay.create(&format!("Go to {}", work.title));
        let mut base = ElementBase::new(position, size);
        base.animated = true;
        base.interactive = true;
        Self {
            base,
            route: format!("/work/{}", work.id),
            label: work.title.to_uppercase(),
            tags: tags
                .iter()
                .map(|t| TagChip {
                    label: t.name.to_uppercase(),
                    color: t.rgb(),
                })
                .collect(),
            image: ImageElement::new(thumbnail, position, size),
            twin: Some(twin),
            hovered: false,
            scroll_offset: 0.0,
            clip: None,
        }
    }

    /// Restrict drawing and the twin to glyph rows `[top, bottom)`.
    pub fn with_clip(mut self, top: f32, bottom: f32) -> Self {
        self.clip = Some((top, bottom));
        self.image.set_clip(self.clip);
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn overlay_id(&self) -> Option<OverlayId> {
        self.twin
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn image(&self) -> &ImageElement {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut ImageElement {
        &mut self.image
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
        self.image.set_scroll_offset(offset);
    }

    pub fn update(&mut self, dt: f32) {
        self.image.update(dt);
    }

    pub fn handle_overlay(&mut self, kind: OverlayEventKind) -> Option<ElementAction> {
        match kind {
            OverlayEventKind::Enter => {
                self.hovered = true;
                self.image.fade_to(0.0);
                None
            }
            OverlayEventKind::Leave => {
                self.hovered = false;
                self.image.fade_to(1.0);
                None
            }
            OverlayEventKind::Click => Some(ElementAction::Navigate(self.route.clone())),
        }
    }

    fn visible_rows(&self, top: f32) -> (f32, f32) {
        let bottom = top + self.base.size.y;
        match self.clip {
            Some((lo, hi)) => (top.max(lo), bottom.min(hi)),
            None => (top, bottom),
        }
    }

    fn row_visible(&self, row: f32) -> bool {
        self.clip.map_or(true, |(lo, hi)| row >= lo && row < hi)
    }

    pub fn draw(&mut self, frame: &mut FrameCtx<'_>) {
        let opacity = self.base.opacity;
        let top = self.base.position.y - self.scroll_offset;
        let left = self.base.position.x;

        if let Some(id) = self.twin {
            let (y0, y1) = self.visible_rows(top);
            let rect = if y1 > y0 {
                frame
                    .field
                    .coords
                    .overlay_rect(Vec2::new(left, y0), Vec2::new(self.base.size.x, y1 - y0))
            } else {
                OverlayRect::default()
            };
            frame.overlay.place(id, rect);
        }

        let cell = frame.field.cell_size();
        if self.hovered {
            let pad = HOVER_PADDING;
            let color = Rgba::new(HOVER_COLOR.r, HOVER_COLOR.g, HOVER_COLOR.b, HOVER_COLOR.a * opacity);
            frame.picture.fill_rect(
                left * cell.x - pad / 2.0,
                top * cell.y - pad / 2.0,
                self.base.size.x * cell.x + pad,
                self.base.size.y * cell.y + pad,
                color,
            );
        }

        self.image.base.opacity = opacity;
        self.image.draw(frame);

        let label_row = top + self.base.size.y - 1.0;
        if self.row_visible(label_row.round()) {
            draw_block(
                frame.glyph,
                frame.picture,
                frame.field,
                &self.label,
                Vec2::new(left + 1.0, label_row),
                self.base.color,
                Rgba::TRANSPARENT,
                opacity,
            );
        }

        self.draw_tags(frame, top, cell);
    }

    /// A cross marker per tag down the card's right edge; hovering opens each into a
    /// colored chip carrying the tag name.
    fn draw_tags(&self, frame: &mut FrameCtx<'_>, top: f32, cell: Vec2) {
        let opacity = self.base.opacity;
        let right = self.base.position.x + self.base.size.x;

        for (i, tag) in self.tags.iter().enumerate() {
            let row = top + 1.0 + 2.0 * i as f32;
            if !self.row_visible(row.round()) {
                continue;
            }
            let center = Vec2::new((right - 1.5) * cell.x, (row + 0.5) * cell.y);
            let r = cell.y * 0.3;
            let stroke = (cell.x * 0.15).max(1.0);
            let cross = tag.color.with_alpha(0.8 * opacity);
            frame.picture.draw_line(
                Vec2::new(center.x - r, center.y - r),
                Vec2::new(center.x + r, center.y + r),
                stroke,
                cross,
            );
            frame.picture.draw_line(
                Vec2::new(center.x + r, center.y - r),
                Vec2::new(center.x - r, center.y + r),
                stroke,
                cross,
            );

            if self.hovered {
                let width = tag.label.chars().count() as f32 + 2.0;
                let x = right - 2.0 - width;
                frame.picture.fill_rect(
                    x * cell.x,
                    row * cell.y,
                    width * cell.x,
                    cell.y,
                    tag.color.with_alpha(0.7 * opacity),
                );
                draw_block(
                    frame.glyph,
                    frame.picture,
                    frame.field,
                    &tag.label,
                    Vec2::new(x + 1.0, row),
                    Rgb::WHITE,
                    Rgba::TRANSPARENT,
                    opacity,
                );
            }
        }
    }

    pub fn destroy(&mut self, overlay: &mut dyn OverlayHost) {
        if let Some(id) = self.twin.take() {
            overlay.remove(id);
        }
        self.hovered = false;
    }
}

/// A team member: first and last name on separate lines near the card's bottom, plus
/// an invisible link button over the whole card when the person has a link.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMemberCard {
    pub base: ElementBase,
    name: TextBlock,
    link: Option<Button>,
}

impl TeamMemberCard {
    pub fn new(
        overlay: &mut dyn OverlayHost,
        person: Option<&Person>,
        position: Vec2,
        size: Vec2,
        name_color: Rgb,
    ) -> Self {
        let name = person.map(|p| split_name(&p.name)).unwrap_or_default();
        let name = TextBlock::new(name, Vec2::new(position.x, position.y + size.y - 2.0)).with_color(name_color);

        let link = person.and_then(|p| {
            let url = p.link.as_deref()?;
            Some(
                Button::new(overlay, &p.name, "", position, ElementAction::OpenExternal(url.to_string()))
                    .with_size(size)
                    .with_color(name_color),
            )
        });

        let mut base = ElementBase::new(position, size);
        base.interactive = link.is_some();
        Self { base, name, link }
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }

    pub fn overlay_id(&self) -> Option<OverlayId> {
        self.link.as_ref().and_then(|b| b.overlay_id())
    }

    pub fn update(&mut self, pointer: Option<Vec2>, pointer_down: bool) {
        if let Some(link) = &mut self.link {
            link.update(pointer, pointer_down);
        }
    }

    pub fn handle_overlay(&mut self, kind: OverlayEventKind) -> Option<ElementAction> {
        self.link.as_mut().and_then(|b| b.handle_overlay(kind))
    }

    pub fn draw(&mut self, frame: &mut FrameCtx<'_>) {
        self.name.base.opacity = self.base.opacity;
        self.name.draw(frame);
        if let Some(link) = &mut self.link {
            link.base.opacity = self.base.opacity;
            link.draw(frame);
        }
    }

    pub fn destroy(&mut self, overlay: &mut dyn OverlayHost) {
        if let Some(link) = &mut self.link {
            link.destroy(overlay);
        }
    }
}

/// One name part per line.
fn split_name(name: &str) -> String {
    name.split(' ').collect::<Vec<_>>().join("\n")
}
