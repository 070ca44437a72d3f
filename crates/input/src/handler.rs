//! Held-key scroll repeat and mouse tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::types::FieldAction;

/// Delay before a held scroll key starts repeating.
pub const SCROLL_REPEAT_DELAY_MS: u32 = 180;
/// Interval between repeats once a scroll key repeats.
pub const SCROLL_REPEAT_MS: u32 = 50;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that keeps scrolling.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Mouse input translated to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { column: u16, row: u16 },
    Down { column: u16, row: u16 },
    Up { column: u16, row: u16 },
    /// Wheel notches, positive scrolls down.
    Wheel(f32),
}

/// Tracks held scroll keys and the mouse pointer.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Option<FieldAction>,
    last_key_time: Instant,
    repeat_timer: u32,
    repeat_accumulator: u32,
    repeat_delay: u32,
    repeat_rate: u32,
    key_release_timeout_ms: u32,
    pointer: Option<(u16, u16)>,
    pointer_down: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(SCROLL_REPEAT_DELAY_MS, SCROLL_REPEAT_MS)
    }

    pub fn with_config(repeat_delay: u32, repeat_rate: u32) -> Self {
        Self {
            held: None,
            last_key_time: Instant::now(),
            repeat_timer: 0,
            repeat_accumulator: 0,
            repeat_delay,
            repeat_rate: repeat_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            pointer: None,
            pointer_down: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Start or refresh a held scroll key. Returns the action for the initial press;
    /// repeats of an already held key return `None` and are produced by [`update`].
    ///
    /// [`update`]: InputHandler::update
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<FieldAction> {
        let action = scroll_action(code)?;
        self.last_key_time = Instant::now();
        if self.held == Some(action) {
            return None;
        }
        self.held = Some(action);
        self.repeat_timer = 0;
        self.repeat_accumulator = 0;
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if scroll_action(code).is_some_and(|a| self.held == Some(a)) {
            self.release();
        }
    }

    /// Advance the repeat timers by `elapsed_ms` and return the repeats that fired.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<FieldAction, 32> {
        let mut actions = ArrayVec::<FieldAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        let since_last_key = self.last_key_time.elapsed();
        if since_last_key > Duration::from_millis(self.key_release_timeout_ms as u64) {
            self.release();
        }

        let Some(action) = self.held else {
            return actions;
        };

        let prev = self.repeat_timer;
        self.repeat_timer = self.repeat_timer.saturating_add(elapsed_ms);
        if self.repeat_timer >= self.repeat_delay {
            let excess = if prev < self.repeat_delay {
                self.repeat_timer - self.repeat_delay
            } else {
                elapsed_ms
            };
            self.repeat_accumulator += excess;
            while self.repeat_accumulator >= self.repeat_rate {
                let _ = actions.try_push(action);
                self.repeat_accumulator -= self.repeat_rate;
            }
        }
        actions
    }

    /// Track the pointer and translate a mouse event. Only the left button counts as
    /// a press.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<PointerEvent> {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer = Some((column, row));
                Some(PointerEvent::Moved { column, row })
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer = Some((column, row));
                self.pointer_down = true;
                Some(PointerEvent::Down { column, row })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.pointer = Some((column, row));
                self.pointer_down = false;
                Some(PointerEvent::Up { column, row })
            }
            MouseEventKind::ScrollDown => Some(PointerEvent::Wheel(1.0)),
            MouseEventKind::ScrollUp => Some(PointerEvent::Wheel(-1.0)),
            _ => None,
        }
    }

    /// Last known pointer cell.
    pub fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Forget the pointer, e.g. when the terminal loses focus.
    pub fn pointer_left(&mut self) {
        self.pointer = None;
        self.pointer_down = false;
    }

    pub fn reset(&mut self) {
        self.release();
        self.last_key_time = Instant::now();
        self.pointer_left();
    }

    fn release(&mut self) {
        self.held = None;
        self.repeat_timer = 0;
        self.repeat_accumulator = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn scroll_action(code: KeyCode) -> Option<FieldAction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(FieldAction::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(FieldAction::ScrollDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_scroll_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(FieldAction::ScrollDown));
        assert_eq!(ih.handle_key_press(KeyCode::Down), None);

        // Before the delay expires: no repeats.
        assert!(ih.update(99).is_empty());
        // Exactly at the delay: still nothing accumulated.
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[FieldAction::ScrollDown]);
        assert_eq!(
            ih.update(50).as_slice(),
            &[FieldAction::ScrollDown, FieldAction::ScrollDown]
        );
    }

    #[test]
    fn test_switching_direction_restarts_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Down);
        assert!(!ih.update(200).is_empty());

        assert_eq!(ih.handle_key_press(KeyCode::Up), Some(FieldAction::ScrollUp));
        assert!(ih.update(50).is_empty());
    }

    #[test]
    fn test_auto_release_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        assert_eq!(ih.handle_key_press(KeyCode::Up), Some(FieldAction::ScrollUp));
        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(500).is_empty());
        assert_eq!(ih.held, None);
    }

    #[test]
    fn test_non_scroll_keys_are_ignored() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Char('w')), None);
        assert_eq!(ih.held, None);
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Char('j'));
        ih.handle_key_release(KeyCode::Char('j'));
        assert!(ih.update(500).is_empty());
    }

    #[test]
    fn test_mouse_tracks_pointer_and_button() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_mouse(mouse(MouseEventKind::Moved, 3, 4)),
            Some(PointerEvent::Moved { column: 3, row: 4 })
        );
        assert_eq!(ih.pointer(), Some((3, 4)));

        ih.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 6));
        assert!(ih.is_pointer_down());
        ih.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 6));
        assert!(!ih.is_pointer_down());

        assert_eq!(
            ih.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(PointerEvent::Wheel(-1.0))
        );
        assert_eq!(ih.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)), None);

        ih.reset();
        assert_eq!(ih.pointer(), None);
    }
}
