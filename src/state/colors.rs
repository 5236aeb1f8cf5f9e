//! Live color state
//!
//! The colors currently on screen. They start from the config record, are
//! changed by theme picks and the color picker, and are only copied back into
//! the record when it is saved.

use h3v3n_config::{Config, get_bundled_theme};
use h3v3n_theme::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveColors {
    /// Text color, always opaque
    pub foreground: Color,
    /// Background color; its alpha tracks the transparency setting
    pub background: Color,
}

impl LiveColors {
    pub fn from_config(config: &Config) -> Self {
        Self {
            foreground: config.text_color.to_color(1.0),
            background: config.bg_color.to_color(config.alpha),
        }
    }

    /// Switch to a bundled theme
    ///
    /// Returns false and leaves the colors untouched when the name is not in
    /// the catalog.
    pub fn apply_theme(&mut self, name: &str) -> bool {
        let Some(theme) = get_bundled_theme(name) else {
            log::debug!("Unknown theme '{}', keeping current colors", name);
            return false;
        };
        match theme.colors() {
            Ok((fg, bg)) => {
                self.foreground = fg;
                self.background = bg.with_alpha(self.background.a);
                true
            }
            Err(e) => {
                log::warn!("Theme '{}' has an invalid color: {}", name, e);
                false
            }
        }
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color.with_alpha(1.0).clamped();
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color.with_alpha(self.background.a).clamped();
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.background.a = alpha;
    }
}
