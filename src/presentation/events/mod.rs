//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Key classification helpers shared by screens.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key quits from anywhere.
    #[must_use]
    pub fn is_force_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key quits while the gallery has focus.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        Self::is_force_quit_event(key)
            || matches!(
                key,
                KeyEvent {
                    code: KeyCode::Char('q'),
                    modifiers: KeyModifiers::NONE,
                    ..
                }
            )
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// Filters out key release and repeat reports.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
    }
}
