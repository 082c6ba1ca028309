//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture
//! - QWERTY character to physical key identifier mapping
//! - Ctrl+C / Escape graceful exit
//!
//! The terminal delivers the character a key produced under the system
//! layout, so the engine's physical-key + shift stream is reconstructed by
//! mapping each typed US-QWERTY character back to its key identifier.

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// A physical key event as the engine expects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalKey {
    pub key_id: &'static str,
    pub shifted: bool,
}

/// Key identifiers for the letter rows, indexed by letter.
const LETTER_KEYS: [&str; 26] = [
    "KeyA", "KeyB", "KeyC", "KeyD", "KeyE", "KeyF", "KeyG", "KeyH", "KeyI",
    "KeyJ", "KeyK", "KeyL", "KeyM", "KeyN", "KeyO", "KeyP", "KeyQ", "KeyR",
    "KeyS", "KeyT", "KeyU", "KeyV", "KeyW", "KeyX", "KeyY", "KeyZ",
];

/// US-QWERTY non-letter keys: (unshifted, shifted, key identifier).
const SYMBOL_KEYS: &[(char, char, &str)] = &[
    ('`', '~', "Backquote"),
    ('1', '!', "Digit1"),
    ('2', '@', "Digit2"),
    ('3', '#', "Digit3"),
    ('4', '$', "Digit4"),
    ('5', '%', "Digit5"),
    ('6', '^', "Digit6"),
    ('7', '&', "Digit7"),
    ('8', '*', "Digit8"),
    ('9', '(', "Digit9"),
    ('0', ')', "Digit0"),
    ('-', '_', "Minus"),
    ('=', '+', "Equal"),
    ('[', '{', "BracketLeft"),
    (']', '}', "BracketRight"),
    (';', ':', "Semicolon"),
    ('\'', '"', "Quote"),
    (',', '<', "Comma"),
    ('.', '>', "Period"),
    ('/', '?', "Slash"),
];

/// Map a typed US-QWERTY character to its physical key and shift state.
/// `None` for characters with no physical key on the layout.
pub fn physical_key_from_char(c: char) -> Option<PhysicalKey> {
    if c == ' ' {
        return Some(PhysicalKey {
            key_id: "Space",
            shifted: false,
        });
    }
    if c.is_ascii_alphabetic() {
        let idx = (c.to_ascii_lowercase() as u8 - b'a') as usize;
        return Some(PhysicalKey {
            key_id: LETTER_KEYS[idx],
            shifted: c.is_ascii_uppercase(),
        });
    }
    for &(base, shifted, key_id) in SYMBOL_KEYS {
        if c == base {
            return Some(PhysicalKey {
                key_id,
                shifted: false,
            });
        }
        if c == shifted {
            return Some(PhysicalKey {
                key_id,
                shifted: true,
            });
        }
    }
    None
}

/// Handles user input from terminal.
pub struct InputHandler {
    /// Timeout for poll operations.
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input).
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input.
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal.
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for keystroke with timeout (non-blocking).
    /// Returns Some(KeyEvent) if key pressed, None if timeout.
    pub fn read_key(&self) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                event::Event::Key(key_event) => Ok(Some(key_event)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Check if key event is an exit signal (Ctrl+C or Escape).
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Check if key is enter/return.
    pub fn is_enter(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter)
    }

    /// Convert key event to the character the terminal delivered.
    pub fn key_to_char(key: &KeyEvent) -> Option<char> {
        match key.code {
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    Some(c)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
