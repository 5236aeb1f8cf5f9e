//! Command enum for testable input handling
//!
//! Commands represent the intent of user input without side effects.
//! Input handlers and the settings dialog return Commands which are then
//! executed by `App::dispatch`.

use h3v3n_theme::Color;

use crate::state::TabId;

/// Commands that can be returned by input handlers
///
/// These commands represent user intent without performing any side effects.
/// The dispatcher is responsible for executing them and persisting the
/// resulting settings.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // === Appearance ===
    /// Switch to a bundled theme by name
    SetTheme(String),
    /// Set the global transparency
    SetAlpha(f64),
    /// Set the font descriptor ("Family Style Size")
    SetFont(String),
    /// Set the text color
    SetTextColor(Color),
    /// Set the background color
    SetBackgroundColor(Color),
    /// Set the hue step applied per border animation tick
    SetRgbSpeed(u32),

    // === Features ===
    /// Show or hide the clock in the HUD
    SetShowClock(bool),
    /// Show or hide CPU/RAM usage in the HUD
    SetShowSystem(bool),

    // === Tabs ===
    /// Create a new tab
    NewTab,
    /// Close the currently active tab
    CloseCurrentTab,
    /// Switch to the next tab
    NextTab,
    /// Switch to the previous tab
    PreviousTab,
    /// Switch to a specific tab by ID
    SwitchTab(TabId),

    // === Terminal I/O ===
    /// Copy the active tab's selection to the clipboard
    Copy,
    /// Paste from clipboard into the active tab
    Paste,
    /// Send form feed to the active tab
    ClearTerminal,
    /// Send bytes to the active tab's shell
    SendToPty(Vec<u8>),

    // === Overlays ===
    OpenSettings,
    CloseSettings,
    /// Show the context menu at the pointer position (pixels)
    OpenContextMenu { x: f32, y: f32 },
    CloseContextMenu,
}

impl Command {
    /// Whether executing this command changes persisted settings
    pub fn changes_settings(&self) -> bool {
        matches!(
            self,
            Command::SetTheme(_)
                | Command::SetAlpha(_)
                | Command::SetFont(_)
                | Command::SetTextColor(_)
                | Command::SetBackgroundColor(_)
                | Command::SetRgbSpeed(_)
                | Command::SetShowClock(_)
                | Command::SetShowSystem(_)
        )
    }

    /// Whether executing this command requires restyling every surface
    pub fn changes_appearance(&self) -> bool {
        matches!(
            self,
            Command::SetTheme(_)
                | Command::SetAlpha(_)
                | Command::SetFont(_)
                | Command::SetTextColor(_)
                | Command::SetBackgroundColor(_)
        )
    }
}
