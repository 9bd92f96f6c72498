//! Key event model
//!
//! Converts crossterm key events into the small set of keys the line editor
//! understands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Punctuation accepted as normal input, in addition to ASCII alphanumerics.
const VALID_PUNCTUATION: &str = "!@#$%^&*()-_=+[]{}|\\:;'\"<>,.?/";

/// A discrete key event as seen by the line editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Printable character (not yet checked against the valid set)
    Char(char),
    Space,
    Backspace,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Esc,
    CtrlC,
    CtrlD,
    /// Anything else the editor does not act on
    Other,
}

impl Key {
    /// Whether this key ends the session without going through the dispatcher
    pub fn is_exit(&self) -> bool {
        matches!(self, Key::Esc | Key::CtrlC | Key::CtrlD)
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        // AltGr arrives as Ctrl+Alt and produces a plain character
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL)
            && !event.modifiers.contains(KeyModifiers::ALT);

        match event.code {
            KeyCode::Char(ch) if ctrl => match ch.to_ascii_lowercase() {
                'c' => Key::CtrlC,
                'd' => Key::CtrlD,
                'h' => Key::Backspace,
                '[' => Key::Esc,
                _ => Key::Other,
            },
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Esc => Key::Esc,
            _ => Key::Other,
        }
    }
}

/// Map a crossterm key event, dropping release and repeat notifications
pub fn map_key_event(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    Some(Key::from(*event))
}

/// Check whether a character belongs to the accepted input set
pub fn is_valid_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || VALID_PUNCTUATION.contains(ch)
}
