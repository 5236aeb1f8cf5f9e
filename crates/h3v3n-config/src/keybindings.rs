//! Default Keybindings
//!
//! Hardcoded keybindings for tab, clipboard and settings operations.
//! Terminal-style Ctrl+Shift chords are used so that plain Ctrl+letter
//! combinations still reach the shell (Ctrl+C interrupts, Ctrl+V is literal
//! next).

use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Tab operations
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,

    // Terminal operations
    Copy,
    Paste,
    ClearTerminal,

    // Settings dialog
    OpenSettings,
}

/// Modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub logo: bool, // Cmd on macOS, Win on Windows
}

impl Modifiers {
    pub const fn none() -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            logo: false,
        }
    }

    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::none()
        }
    }

    pub const fn ctrl_shift() -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::none()
        }
    }
}

/// A key code (simplified, maps to winit logical keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Special keys
    PageUp,
    PageDown,

    // Punctuation
    Comma,
}

impl Key {
    /// Map a typed character to a key, case-insensitively
    pub fn from_char(c: char) -> Option<Self> {
        let key = match c.to_ascii_lowercase() {
            'a' => Key::A,
            'b' => Key::B,
            'c' => Key::C,
            'd' => Key::D,
            'e' => Key::E,
            'f' => Key::F,
            'g' => Key::G,
            'h' => Key::H,
            'i' => Key::I,
            'j' => Key::J,
            'k' => Key::K,
            'l' => Key::L,
            'm' => Key::M,
            'n' => Key::N,
            'o' => Key::O,
            'p' => Key::P,
            'q' => Key::Q,
            'r' => Key::R,
            's' => Key::S,
            't' => Key::T,
            'u' => Key::U,
            'v' => Key::V,
            'w' => Key::W,
            'x' => Key::X,
            'y' => Key::Y,
            'z' => Key::Z,
            // Shift+Comma reports '<' on US layouts
            ',' | '<' => Key::Comma,
            _ => return None,
        };
        Some(key)
    }
}

/// A complete keybinding (modifiers + key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keybinding {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl Keybinding {
    pub const fn new(modifiers: Modifiers, key: Key) -> Self {
        Self { modifiers, key }
    }
}

/// Default keybindings configuration
pub struct Keybindings {
    bindings: HashMap<Keybinding, Action>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::new()
    }
}

impl Keybindings {
    /// Create the default keybindings
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Clipboard
        bindings.insert(Keybinding::new(Modifiers::ctrl_shift(), Key::C), Action::Copy);
        bindings.insert(Keybinding::new(Modifiers::ctrl_shift(), Key::V), Action::Paste);

        // Tabs
        bindings.insert(Keybinding::new(Modifiers::ctrl_shift(), Key::T), Action::NewTab);
        bindings.insert(Keybinding::new(Modifiers::ctrl_shift(), Key::W), Action::CloseTab);
        bindings.insert(Keybinding::new(Modifiers::ctrl(), Key::PageDown), Action::NextTab);
        bindings.insert(Keybinding::new(Modifiers::ctrl(), Key::PageUp), Action::PreviousTab);

        // Terminal
        bindings.insert(
            Keybinding::new(Modifiers::ctrl_shift(), Key::L),
            Action::ClearTerminal,
        );

        // Settings
        bindings.insert(
            Keybinding::new(Modifiers::ctrl_shift(), Key::Comma),
            Action::OpenSettings,
        );

        Self { bindings }
    }

    /// Look up the action for a key combination
    pub fn get(&self, binding: &Keybinding) -> Option<Action> {
        self.bindings.get(binding).copied()
    }
}
