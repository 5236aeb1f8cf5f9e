//! Pure keyboard input handling
//!
//! Converts winit key presses into application commands, overlay navigation
//! or shell bytes. Everything here is side-effect free so routing can be unit
//! tested without a window.

use h3v3n_config::{Action, Key as BindingKey, Keybinding, Keybindings, Modifiers};
use winit::keyboard::{Key, NamedKey};

use super::{Command, encode_key};
use crate::state::DialogKey;

/// Keyboard modifiers state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Command/Super key
    pub command: bool,
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ModifierState {
    /// Create from winit Modifiers
    pub fn from_winit(mods: &winit::event::Modifiers) -> Self {
        let state = mods.state();
        Self {
            command: state.super_key(),
            control: state.control_key(),
            shift: state.shift_key(),
            alt: state.alt_key(),
        }
    }

    pub fn control_shift() -> Self {
        Self {
            control: true,
            shift: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.command && !self.control && !self.shift && !self.alt
    }

    fn to_binding_modifiers(self) -> Modifiers {
        Modifiers {
            ctrl: self.control,
            alt: self.alt,
            shift: self.shift,
            logo: self.command,
        }
    }
}

/// Where keyboard input currently goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFocus {
    Terminal,
    Settings,
    ContextMenu,
}

/// Result of processing a keyboard event
#[derive(Debug, Clone, PartialEq)]
pub enum KeyboardResult {
    /// Event was an application shortcut, execute this command
    Shortcut(Command),
    /// Event navigates the open overlay
    Overlay(DialogKey),
    /// Event should be sent to the active shell as bytes
    TerminalInput(Vec<u8>),
    /// Event was consumed but no action needed
    Handled,
    /// Event was not handled
    Ignored,
}

/// Map a bound action to the command it triggers
pub fn action_to_command(action: Action) -> Command {
    match action {
        Action::NewTab => Command::NewTab,
        Action::CloseTab => Command::CloseCurrentTab,
        Action::NextTab => Command::NextTab,
        Action::PreviousTab => Command::PreviousTab,
        Action::Copy => Command::Copy,
        Action::Paste => Command::Paste,
        Action::ClearTerminal => Command::ClearTerminal,
        Action::OpenSettings => Command::OpenSettings,
    }
}

/// Build the keybinding lookup key for a winit key press
fn to_keybinding(key: &Key, mods: ModifierState) -> Option<Keybinding> {
    let key = match key {
        Key::Character(c) => BindingKey::from_char(c.chars().next()?)?,
        Key::Named(NamedKey::PageUp) => BindingKey::PageUp,
        Key::Named(NamedKey::PageDown) => BindingKey::PageDown,
        _ => return None,
    };
    Some(Keybinding::new(mods.to_binding_modifiers(), key))
}

/// Map a key press to overlay navigation
pub fn overlay_key(key: &Key, mods: ModifierState) -> Option<DialogKey> {
    let Key::Named(named) = key else {
        return None;
    };
    let nav = match named {
        NamedKey::Tab if mods.shift => DialogKey::PreviousPage,
        NamedKey::Tab => DialogKey::NextPage,
        NamedKey::ArrowUp => DialogKey::Up,
        NamedKey::ArrowDown => DialogKey::Down,
        NamedKey::ArrowLeft => DialogKey::Left,
        NamedKey::ArrowRight => DialogKey::Right,
        NamedKey::Enter | NamedKey::Space => DialogKey::Activate,
        NamedKey::Escape => DialogKey::Close,
        _ => return None,
    };
    Some(nav)
}

/// Route a key press
///
/// While an overlay is open it receives every key and nothing reaches the
/// shell. Otherwise bound chords become commands (and are consumed) and
/// everything else is encoded for the shell.
pub fn handle_keyboard_input(
    key: &Key,
    mods: ModifierState,
    bindings: &Keybindings,
    focus: KeyFocus,
    application_cursor: bool,
) -> KeyboardResult {
    if focus != KeyFocus::Terminal {
        return match overlay_key(key, mods) {
            Some(nav) => KeyboardResult::Overlay(nav),
            None => KeyboardResult::Handled,
        };
    }

    if let Some(action) = to_keybinding(key, mods).and_then(|b| bindings.get(&b)) {
        return KeyboardResult::Shortcut(action_to_command(action));
    }

    // Super chords belong to the desktop
    if mods.command {
        return KeyboardResult::Ignored;
    }

    match encode_key(key, mods, application_cursor) {
        Some(bytes) => KeyboardResult::TerminalInput(bytes),
        None => KeyboardResult::Ignored,
    }
}
