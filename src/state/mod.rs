//! Application state modules
//!
//! This module contains pure state management types that are independent of
//! window and terminal implementations. This allows for easy unit testing.

mod colors;
mod context_menu;
mod settings;
mod tab_state;

pub use colors::LiveColors;
pub use context_menu::{ContextMenuItem, ContextMenuState};
pub use settings::{DialogKey, FontDescriptor, SettingsDialog, SettingsPage, SettingsRow};
pub use tab_state::{TabId, TabInfo, TabState};
