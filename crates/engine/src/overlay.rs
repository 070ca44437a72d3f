//! Overlay twins: accessible, clickable stand-ins for interactive elements.
//!
//! The engine never owns input widgets. Interactive elements ask an [`OverlayHost`] for
//! a twin, re-place it every frame in viewport pixels, and remove it when destroyed. The
//! host reports pointer activity back as [`OverlayEvent`]s, which the caller forwards to
//! `PageManager::dispatch`.
//!
//! [`HeadlessOverlay`] is an in-memory host with hit-testing, used by the terminal
//! preview (fed from mouse capture) and by tests.

use crate::core::OverlayRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEventKind {
    Click,
    Enter,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayEvent {
    pub id: OverlayId,
    pub kind: OverlayEventKind,
}

impl OverlayEvent {
    pub fn new(id: OverlayId, kind: OverlayEventKind) -> Self {
        Self { id, kind }
    }
}

pub trait OverlayHost {
    /// Create a twin with an accessible label. It is not hit-testable until placed.
    fn create(&mut self, label: &str) -> OverlayId;

    /// Move a twin. Unknown ids are ignored.
    fn place(&mut self, id: OverlayId, rect: OverlayRect);

    /// Remove a twin. Unknown ids are ignored.
    fn remove(&mut self, id: OverlayId);
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayEntry {
    pub id: OverlayId,
    pub label: String,
    pub rect: Option<OverlayRect>,
}

/// In-memory overlay host.
///
/// Later twins sit on top of earlier ones for hit-testing, matching DOM order.
#[derive(Debug, Default)]
pub struct HeadlessOverlay {
    next_id: u32,
    entries: Vec<OverlayEntry>,
    hovered: Option<OverlayId>,
    events: Vec<OverlayEvent>,
}

impl HeadlessOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[OverlayEntry] {
        &self.entries
    }

    pub fn entry(&self, id: OverlayId) -> Option<&OverlayEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// First twin (in creation order) carrying `label`.
    pub fn find_label(&self, label: &str) -> Option<&OverlayEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn hovered(&self) -> Option<OverlayId> {
        self.hovered
    }

    /// Topmost placed twin containing the viewport point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<OverlayId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.rect.is_some_and(|r| r.contains(x, y)))
            .map(|e| e.id)
    }

    /// Track the pointer, queueing leave/enter events when the hovered twin changes.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let hit = self.hit_test(x, y);
        self.set_hovered(hit);
    }

    /// The pointer left the viewport.
    pub fn pointer_left(&mut self) {
        self.set_hovered(None);
    }

    /// Click at a viewport point. Returns the clicked twin, if any.
    pub fn click(&mut self, x: f32, y: f32) -> Option<OverlayId> {
        self.pointer_moved(x, y);
        let hit = self.hovered?;
        self.events.push(OverlayEvent::new(hit, OverlayEventKind::Click));
        Some(hit)
    }

    /// Move queued events into `out`, keeping this host's buffer for reuse.
    pub fn drain_events_into(&mut self, out: &mut Vec<OverlayEvent>) {
        out.append(&mut self.events);
    }

    pub fn take_events(&mut self) -> Vec<OverlayEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_hovered(&mut self, hit: Option<OverlayId>) {
        if hit == self.hovered {
            return;
        }
        if let Some(old) = self.hovered {
            self.events.push(OverlayEvent::new(old, OverlayEventKind::Leave));
        }
        if let Some(new) = hit {
            self.events.push(OverlayEvent::new(new, OverlayEventKind::Enter));
        }
        self.hovered = hit;
    }
}

impl OverlayHost for HeadlessOverlay {
    fn create(&mut self, label: &str) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(OverlayEntry {
            id,
            label: label.to_string(),
            rect: None,
        });
        id
    }

    fn place(&mut self, id: OverlayId, rect: OverlayRect) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.id == id) {
            e.rect = Some(rect);
        }
    }

    fn remove(&mut self, id: OverlayId) {
        self.entries.retain(|e| e.id != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }
}
