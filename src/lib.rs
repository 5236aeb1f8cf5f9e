//! H3V3N - themeable terminal shell
//!
//! The application layer lives here so it can be tested without a window:
//! - `app` - the application context and command dispatch
//! - `managers` - settings persistence and the tab lifecycle
//! - `state` - pure state: tabs, live colors, settings dialog, context menu
//! - `input` - keyboard routing and key encoding
//! - `animation` / `hud` - the periodic border and status updates
//! - `chrome` / `window` - the styling seam and its winit implementation
//! - `font` - installed monospace families for the font picker
//!
//! Library crates:
//! - `h3v3n-core` - terminal grid, PTY and the surface trait
//! - `h3v3n-config` - settings file, themes, keybindings, desktop entry
//! - `h3v3n-theme` - colors and stylesheet generation

pub mod animation;
pub mod app;
pub mod chrome;
pub mod font;
pub mod hud;
pub mod input;
pub mod managers;
pub mod state;
pub mod window;
