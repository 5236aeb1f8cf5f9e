//! Terminal context menu state
//!
//! Opened with the secondary mouse button over a terminal. Items map straight
//! to commands; separators can never be selected.

use crate::input::Command;

use super::DialogKey;

/// Menu geometry in logical pixels
pub const MENU_WIDTH: f32 = 160.0;
pub const MENU_PADDING_Y: f32 = 6.0;
pub const ITEM_HEIGHT: f32 = 24.0;
pub const SEPARATOR_HEIGHT: f32 = 12.0;

/// Entries of the terminal context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuItem {
    Copy,
    Paste,
    Separator,
    ClearTerminal,
}

impl ContextMenuItem {
    /// All items in display order
    pub const ALL: [ContextMenuItem; 4] = [
        ContextMenuItem::Copy,
        ContextMenuItem::Paste,
        ContextMenuItem::Separator,
        ContextMenuItem::ClearTerminal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContextMenuItem::Copy => "Copy",
            ContextMenuItem::Paste => "Paste",
            ContextMenuItem::Separator => "",
            ContextMenuItem::ClearTerminal => "Clear Terminal",
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, ContextMenuItem::Separator)
    }

    pub fn height(&self) -> f32 {
        if self.is_separator() {
            SEPARATOR_HEIGHT
        } else {
            ITEM_HEIGHT
        }
    }

    /// The command this item runs, if any
    pub fn command(&self) -> Option<Command> {
        match self {
            ContextMenuItem::Copy => Some(Command::Copy),
            ContextMenuItem::Paste => Some(Command::Paste),
            ContextMenuItem::Separator => None,
            ContextMenuItem::ClearTerminal => Some(Command::ClearTerminal),
        }
    }
}

/// Context menu state
#[derive(Debug, Clone, Default)]
pub struct ContextMenuState {
    /// Whether the context menu is visible
    pub visible: bool,
    /// Position of the menu (x, y in pixels)
    pub position: (f32, f32),
    /// Currently selected item index
    pub selected_index: usize,
}

impl ContextMenuState {
    /// Create a new hidden context menu state
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the context menu at the given position
    pub fn show(&mut self, x: f32, y: f32) {
        self.visible = true;
        self.position = (x, y);
        self.selected_index = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn items(&self) -> &'static [ContextMenuItem] {
        &ContextMenuItem::ALL
    }

    pub fn selected(&self) -> ContextMenuItem {
        ContextMenuItem::ALL[self.selected_index]
    }

    /// Select the next item, skipping separators
    pub fn select_next(&mut self) {
        let mut index = self.selected_index;
        while index + 1 < ContextMenuItem::ALL.len() {
            index += 1;
            if !ContextMenuItem::ALL[index].is_separator() {
                self.selected_index = index;
                return;
            }
        }
    }

    /// Select the previous item, skipping separators
    pub fn select_previous(&mut self) {
        let mut index = self.selected_index;
        while index > 0 {
            index -= 1;
            if !ContextMenuItem::ALL[index].is_separator() {
                self.selected_index = index;
                return;
            }
        }
    }

    /// Total menu height including padding
    pub fn height(&self) -> f32 {
        MENU_PADDING_Y * 2.0 + ContextMenuItem::ALL.iter().map(|i| i.height()).sum::<f32>()
    }

    /// Check if a point is inside the menu
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if !self.visible {
            return false;
        }
        let (mx, my) = self.position;
        x >= mx && x < mx + MENU_WIDTH && y >= my && y < my + self.height()
    }

    /// Index of the selectable item under a point
    pub fn item_at(&self, x: f32, y: f32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let mut top = self.position.1 + MENU_PADDING_Y;
        for (index, item) in ContextMenuItem::ALL.iter().enumerate() {
            let bottom = top + item.height();
            if y >= top && y < bottom {
                return (!item.is_separator()).then_some(index);
            }
            top = bottom;
        }
        None
    }

    /// Primary click while visible
    ///
    /// A click on an item runs it; a click outside closes the menu. Clicks on
    /// the separator or padding do nothing.
    pub fn click(&mut self, x: f32, y: f32) -> Option<Command> {
        if !self.contains(x, y) {
            return Some(Command::CloseContextMenu);
        }
        self.selected_index = self.item_at(x, y)?;
        self.activate()
    }

    /// Run the selected item and close the menu
    pub fn activate(&mut self) -> Option<Command> {
        let command = self.selected().command()?;
        self.hide();
        Some(command)
    }

    /// Keyboard navigation while visible
    pub fn handle_key(&mut self, key: DialogKey) -> Option<Command> {
        match key {
            DialogKey::Up => self.select_previous(),
            DialogKey::Down => self.select_next(),
            DialogKey::Activate => return self.activate(),
            DialogKey::Close => return Some(Command::CloseContextMenu),
            _ => {}
        }
        None
    }
}
