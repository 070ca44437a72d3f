//! Key mapping from terminal events to field actions.

use crate::types::FieldAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to field actions.
pub fn handle_key_event(key: KeyEvent) -> Option<FieldAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Navigation
        KeyCode::Char('1') | KeyCode::Char('h') | KeyCode::Char('H') => Some(FieldAction::GoHome),
        KeyCode::Char('2') | KeyCode::Char('w') | KeyCode::Char('W') => Some(FieldAction::GoWork),
        KeyCode::Char('3') | KeyCode::Char('c') | KeyCode::Char('C') => Some(FieldAction::GoContacts),

        // Scrolling
        KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') | KeyCode::Char('K') => Some(FieldAction::ScrollUp),
        KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(FieldAction::ScrollDown)
        }

        // Display
        KeyCode::Char('m') | KeyCode::Char('M') => Some(FieldAction::ToggleMobile),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(FieldAction::ImagesToGlyphs),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(FieldAction::ImagesToPictures),

        _ => None,
    }
}

/// Check if key should quit the preview.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(FieldAction::GoHome)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('W'))),
            Some(FieldAction::GoWork)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('3'))),
            Some(FieldAction::GoContacts)
        );
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(FieldAction::ScrollUp)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('j'))),
            Some(FieldAction::ScrollDown)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::PageDown)),
            Some(FieldAction::ScrollDown)
        );
    }

    #[test]
    fn test_display_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('m'))),
            Some(FieldAction::ToggleMobile)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('g'))),
            Some(FieldAction::ImagesToGlyphs)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('P'))),
            Some(FieldAction::ImagesToPictures)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        // Ctrl+C quits instead of navigating to contacts.
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }
}
