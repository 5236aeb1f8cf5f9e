//! Configuration management
//!
//! Owns the persisted settings record, the live colors derived from it and the
//! store they are written to. Settings commands are applied here; every
//! applied change is followed by a save.

use std::path::Path;

use h3v3n_config::{Config, ConfigLoadResult, ConfigStore, DefaultsReason, MAX_ALPHA, MIN_ALPHA};

use crate::input::Command;
use crate::state::LiveColors;

/// Manages application configuration and live colors
#[derive(Debug)]
pub struct ConfigManager {
    store: ConfigStore,
    config: Config,
    colors: LiveColors,
    /// Number of successful writes, for diagnostics
    saves: usize,
}

impl ConfigManager {
    /// Load settings from `store`, falling back to defaults
    pub fn load(store: ConfigStore) -> Self {
        let result = store.load();
        if let ConfigLoadResult::UsedDefaults(DefaultsReason::Malformed(_)) = &result {
            // Overwritten by the first save
            log::warn!("Settings file {:?} will be replaced on next change", store.path());
        }
        Self::with_config(store, result.into_config())
    }

    pub fn with_config(store: ConfigStore, config: Config) -> Self {
        let colors = LiveColors::from_config(&config);
        Self {
            store,
            config,
            colors,
            saves: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn colors(&self) -> &LiveColors {
        &self.colors
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Copy live colors into the record and write it
    ///
    /// Write failures are logged; the UI keeps running with in-memory state.
    pub fn save(&mut self) -> bool {
        self.config
            .snapshot_colors(self.colors.foreground, self.colors.background);
        match self.store.save(&self.config) {
            Ok(()) => {
                self.saves += 1;
                log::debug!("Saved settings to {:?}", self.store.path());
                true
            }
            Err(e) => {
                log::error!("Failed to save settings: {}", e);
                false
            }
        }
    }

    /// Apply a settings command
    ///
    /// Returns false for commands that change nothing persisted, including
    /// unknown theme names.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::SetTheme(name) => self.colors.apply_theme(name),
            Command::SetAlpha(alpha) => {
                let alpha = if alpha.is_finite() {
                    alpha.clamp(MIN_ALPHA, MAX_ALPHA)
                } else {
                    self.config.alpha
                };
                self.config.alpha = alpha;
                self.colors.set_alpha(alpha);
                true
            }
            Command::SetFont(font) => {
                self.config.font = font.clone();
                true
            }
            Command::SetTextColor(color) => {
                self.colors.set_foreground(*color);
                true
            }
            Command::SetBackgroundColor(color) => {
                self.colors.set_background(*color);
                true
            }
            Command::SetRgbSpeed(speed) => {
                self.config.rgb_speed = *speed;
                true
            }
            Command::SetShowClock(show) => {
                self.config.show_clock = *show;
                true
            }
            Command::SetShowSystem(show) => {
                self.config.show_sys = *show;
                true
            }
            _ => false,
        }
    }
}
