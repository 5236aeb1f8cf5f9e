//! Key encoding using termwiz
//!
//! Converts winit keyboard events to terminal escape sequences using termwiz's
//! KeyCode::encode() method.

use termwiz::input::{KeyCode, KeyCodeEncodeModes, KeyboardEncoding, Modifiers as TermwizModifiers};
use winit::keyboard::{Key, NamedKey};

use super::ModifierState;

/// Convert a winit Key to a termwiz KeyCode
fn winit_to_termwiz_keycode(key: &Key) -> Option<KeyCode> {
    match key {
        Key::Character(c) => c.chars().next().map(KeyCode::Char),
        Key::Named(named) => {
            let code = match named {
                // Navigation
                NamedKey::ArrowUp => KeyCode::UpArrow,
                NamedKey::ArrowDown => KeyCode::DownArrow,
                NamedKey::ArrowLeft => KeyCode::LeftArrow,
                NamedKey::ArrowRight => KeyCode::RightArrow,
                NamedKey::Home => KeyCode::Home,
                NamedKey::End => KeyCode::End,
                NamedKey::PageUp => KeyCode::PageUp,
                NamedKey::PageDown => KeyCode::PageDown,

                // Editing
                NamedKey::Backspace => KeyCode::Backspace,
                NamedKey::Delete => KeyCode::Delete,
                NamedKey::Insert => KeyCode::Insert,
                NamedKey::Enter => KeyCode::Enter,
                NamedKey::Tab => KeyCode::Tab,
                NamedKey::Escape => KeyCode::Escape,
                NamedKey::Space => KeyCode::Char(' '),

                // Function keys
                NamedKey::F1 => KeyCode::Function(1),
                NamedKey::F2 => KeyCode::Function(2),
                NamedKey::F3 => KeyCode::Function(3),
                NamedKey::F4 => KeyCode::Function(4),
                NamedKey::F5 => KeyCode::Function(5),
                NamedKey::F6 => KeyCode::Function(6),
                NamedKey::F7 => KeyCode::Function(7),
                NamedKey::F8 => KeyCode::Function(8),
                NamedKey::F9 => KeyCode::Function(9),
                NamedKey::F10 => KeyCode::Function(10),
                NamedKey::F11 => KeyCode::Function(11),
                NamedKey::F12 => KeyCode::Function(12),

                _ => return None,
            };
            Some(code)
        }
        _ => None,
    }
}

fn build_modifiers(mods: ModifierState) -> TermwizModifiers {
    let mut out = TermwizModifiers::NONE;
    if mods.control {
        out |= TermwizModifiers::CTRL;
    }
    if mods.shift {
        out |= TermwizModifiers::SHIFT;
    }
    if mods.alt {
        out |= TermwizModifiers::ALT;
    }
    out
}

/// Encode a winit key event to terminal escape sequence bytes
///
/// Returns the bytes to send to the PTY, or None if the key cannot be encoded.
/// `application_cursor` follows the terminal's DECCKM mode.
pub fn encode_key(key: &Key, mods: ModifierState, application_cursor: bool) -> Option<Vec<u8>> {
    let keycode = winit_to_termwiz_keycode(key)?;

    let modes = KeyCodeEncodeModes {
        encoding: KeyboardEncoding::Xterm,
        application_cursor_keys: application_cursor,
        newline_mode: false,
        modify_other_keys: None,
    };

    match keycode.encode(build_modifiers(mods), modes, true) {
        Ok(encoded) if !encoded.is_empty() => Some(encoded.into_bytes()),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Failed to encode key {:?}: {}", key, e);
            None
        }
    }
}
