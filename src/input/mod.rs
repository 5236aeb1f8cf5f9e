//! Input handling
//!
//! Keyboard routing, key encoding and the command vocabulary shared by input
//! handlers and the settings dialog.

mod commands;
mod key_encoder;
mod keyboard;

pub use commands::Command;
pub use key_encoder::encode_key;
pub use keyboard::{
    KeyFocus, KeyboardResult, ModifierState, action_to_command, handle_keyboard_input, overlay_key,
};
