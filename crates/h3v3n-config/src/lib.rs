//! H3V3N Configuration Management
//!
//! Handles loading and persisting the settings record at
//! ~/.config/h3v3n-terminal/master_config.json, the bundled theme catalog,
//! keybindings, and the desktop launcher entry.
//!
//! Loading never fails: a missing or unreadable file yields the defaults and a
//! [`ConfigLoadResult::UsedDefaults`] describing why. Persisted fields are
//! merged one by one over the defaults, so a single bad field does not
//! discard the rest of the file.

pub mod desktop;
pub mod keybindings;
pub mod themes;

pub use desktop::{APP_ID, desktop_entry, install_desktop_entry};
pub use keybindings::{Action, Key, Keybinding, Keybindings, Modifiers};
pub use themes::{BundledTheme, bundled_theme_names, get_bundled_theme, sorted_theme_names};

use h3v3n_theme::Color;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration directory name under ~/.config
const CONFIG_DIR_NAME: &str = "h3v3n-terminal";
/// Configuration file name
const CONFIG_FILE_NAME: &str = "master_config.json";
/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "H3V3N_CONFIG_DIR";

/// Lowest transparency the settings slider allows
pub const MIN_ALPHA: f64 = 0.05;
/// Fully opaque
pub const MAX_ALPHA: f64 = 1.0;

/// RGB triple with 0.0-1.0 float channels, as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self, alpha: f64) -> Color {
        Color::rgba(self.r, self.g, self.b, alpha)
    }

    fn clamped(self) -> Self {
        let c = Color::rgb(self.r, self.g, self.b).clamped();
        Self::from(c)
    }
}

impl From<Color> for Rgb {
    fn from(c: Color) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

/// The persisted settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Background transparency, 0.05-1.0
    pub alpha: f64,
    /// Terminal text color
    pub text_color: Rgb,
    /// Terminal background color (alpha comes from `alpha`)
    pub bg_color: Rgb,
    /// Font descriptor: family, weight and size, e.g. "Monospace Bold 12"
    pub font: String,
    /// Hue steps per border animation tick
    pub rgb_speed: u32,
    /// Show the wall clock in the HUD
    pub show_clock: bool,
    /// Show CPU and memory usage in the HUD
    pub show_sys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: 0.75,
            text_color: Rgb::new(0.2, 1.0, 0.6),
            bg_color: Rgb::new(0.0, 0.0, 0.0),
            font: "Monospace Bold 12".to_string(),
            rgb_speed: 4,
            show_clock: true,
            show_sys: true,
        }
    }
}

impl Config {
    /// Overwrite every known field present in `map`
    ///
    /// Fields whose value has the wrong type keep their current value.
    /// Returns the names of the fields that were skipped.
    pub fn merge_json(&mut self, map: &Map<String, Value>) -> Vec<&'static str> {
        let mut skipped = Vec::new();
        merge_field(&mut self.alpha, map, "alpha", &mut skipped);
        merge_field(&mut self.text_color, map, "text_color", &mut skipped);
        merge_field(&mut self.bg_color, map, "bg_color", &mut skipped);
        merge_field(&mut self.font, map, "font", &mut skipped);
        merge_field(&mut self.rgb_speed, map, "rgb_speed", &mut skipped);
        merge_field(&mut self.show_clock, map, "show_clock", &mut skipped);
        merge_field(&mut self.show_sys, map, "show_sys", &mut skipped);
        skipped
    }

    /// Pull alpha and color channels back into range
    pub fn clamp(&mut self) {
        let alpha = if self.alpha.is_nan() {
            Self::default().alpha
        } else {
            self.alpha
        };
        self.alpha = alpha.clamp(MIN_ALPHA, MAX_ALPHA);
        self.text_color = self.text_color.clamped();
        self.bg_color = self.bg_color.clamped();
    }

    /// Copy the live colors into the record before saving
    pub fn snapshot_colors(&mut self, foreground: Color, background: Color) {
        self.text_color = Rgb::from(foreground);
        self.bg_color = Rgb::from(background);
    }

    /// Human-readable JSON with a stable field order
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(ConfigError::SerializeError)?;
        let mut out = String::from_utf8_lossy(&buf).into_owned();
        out.push('\n');
        Ok(out)
    }
}

fn merge_field<T: DeserializeOwned>(
    slot: &mut T,
    map: &Map<String, Value>,
    key: &'static str,
    skipped: &mut Vec<&'static str>,
) {
    let Some(value) = map.get(key) else {
        return;
    };
    match T::deserialize(value) {
        Ok(v) => *slot = v,
        Err(e) => {
            log::warn!("Ignoring config field '{}': {}", key, e);
            skipped.push(key);
        }
    }
}

/// Why the defaults were used instead of a persisted record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultsReason {
    /// No config file exists yet
    Missing,
    /// The file exists but could not be read
    Unreadable(String),
    /// The file is not a JSON object
    Malformed(String),
}

/// Outcome of [`ConfigStore::load`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLoadResult {
    /// Persisted values merged over the defaults
    Loaded(Config),
    /// Nothing usable on disk
    UsedDefaults(DefaultsReason),
}

impl ConfigLoadResult {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ConfigLoadResult::Loaded(_))
    }

    /// The effective configuration
    pub fn into_config(self) -> Config {
        match self {
            ConfigLoadResult::Loaded(config) => config,
            ConfigLoadResult::UsedDefaults(_) => Config::default(),
        }
    }
}

/// Reads and writes the config file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user location (honours `H3V3N_CONFIG_DIR`)
    pub fn default_location() -> Result<Self, ConfigError> {
        let dir = config_dir_from(std::env::var_os(CONFIG_DIR_ENV), dirs::home_dir())?;
        Ok(Self::in_dir(dir))
    }

    /// Store using the standard file name inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record merged over the defaults
    ///
    /// Creates the containing directory as a side effect. Never fails.
    pub fn load(&self) -> ConfigLoadResult {
        if let Some(dir) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                log::debug!("Could not create config directory {:?}: {}", dir, e);
            }
        }

        if !self.path.exists() {
            log::info!("Config file not found at {:?}, using defaults", self.path);
            return ConfigLoadResult::UsedDefaults(DefaultsReason::Missing);
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                let err = ConfigError::ReadError(self.path.clone(), e);
                log::warn!("{}, using defaults", err);
                return ConfigLoadResult::UsedDefaults(DefaultsReason::Unreadable(err.to_string()));
            }
        };

        let map = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                log::warn!("Config {:?} is not a JSON object, using defaults", self.path);
                return ConfigLoadResult::UsedDefaults(DefaultsReason::Malformed(
                    "expected a JSON object".to_string(),
                ));
            }
            Err(e) => {
                let err = ConfigError::ParseError(self.path.clone(), e);
                log::warn!("{}, using defaults", err);
                return ConfigLoadResult::UsedDefaults(DefaultsReason::Malformed(err.to_string()));
            }
        };

        let mut config = Config::default();
        config.merge_json(&map);
        config.clamp();
        log::info!("Loaded configuration from {:?}", self.path);
        ConfigLoadResult::Loaded(config)
    }

    /// Overwrite the file with the full record
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = config.to_json_pretty()?;
        fs::write(&self.path, json).map_err(|e| ConfigError::WriteError(self.path.clone(), e))?;
        log::debug!("Saved configuration to {:?}", self.path);
        Ok(())
    }
}

/// Resolve the config directory from an override and the home directory
pub fn config_dir_from(
    override_dir: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home.ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,
    #[error("Failed to read {0:?}: {1}")]
    ReadError(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse {0:?}: {1}")]
    ParseError(PathBuf, #[source] serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[source] serde_json::Error),
    #[error("Failed to write {0:?}: {1}")]
    WriteError(PathBuf, #[source] std::io::Error),
    #[error("Failed to create {0:?}: {1}")]
    CreateDirError(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join(CONFIG_FILE_NAME))
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.alpha, 0.75);
        assert_eq!(config.text_color, Rgb::new(0.2, 1.0, 0.6));
        assert_eq!(config.bg_color, Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(config.font, "Monospace Bold 12");
        assert_eq!(config.rgb_speed, 4);
        assert!(config.show_clock);
        assert!(config.show_sys);
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let config = Config {
            alpha: 0.35,
            text_color: Rgb::new(0.7411764705882353, 0.5764705882352941, 0.9764705882352941),
            bg_color: Rgb::new(0.1, 0.2, 0.30000000000000004),
            font: "Fira Code Medium 14".to_string(),
            rgb_speed: 11,
            show_clock: false,
            show_sys: true,
        };

        store.save(&config).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, ConfigLoadResult::Loaded(config));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let result = store_in(&dir).load();
        assert_eq!(result, ConfigLoadResult::UsedDefaults(DefaultsReason::Missing));
        assert_eq!(result.into_config(), Config::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let result = store.load();
        assert!(matches!(
            result,
            ConfigLoadResult::UsedDefaults(DefaultsReason::Malformed(_))
        ));
        assert_eq!(result.into_config(), Config::default());
    }

    #[test]
    fn test_non_object_root_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert!(matches!(
            store.load(),
            ConfigLoadResult::UsedDefaults(DefaultsReason::Malformed(_))
        ));
    }

    #[test]
    fn test_unreadable_path_uses_defaults() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let store = ConfigStore::at(dir.path().to_path_buf());
        let result = store.load();
        assert!(matches!(
            result,
            ConfigLoadResult::UsedDefaults(DefaultsReason::Unreadable(_))
        ));
    }

    #[test]
    fn test_partial_config() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{ "font": "Hack 10", "show_clock": false }"#).unwrap();

        let config = store.load().into_config();
        assert_eq!(config.font, "Hack 10");
        assert!(!config.show_clock);
        // Other fields should have defaults
        assert_eq!(config.alpha, 0.75);
        assert_eq!(config.rgb_speed, 4);
    }

    #[test]
    fn test_wrongly_typed_field_keeps_default() {
        let mut config = Config::default();
        let value: Value = serde_json::from_str(
            r#"{ "alpha": "opaque", "rgb_speed": 9, "text_color": {"r": 1} , "mystery": 1 }"#,
        )
        .unwrap();
        let skipped = config.merge_json(value.as_object().unwrap());

        assert_eq!(skipped, vec!["alpha", "text_color"]);
        assert_eq!(config.alpha, 0.75);
        assert_eq!(config.rgb_speed, 9);
        assert_eq!(config.text_color, Rgb::new(0.2, 1.0, 0.6));
    }

    #[test]
    fn test_negative_speed_keeps_default() {
        let mut config = Config::default();
        let value: Value = serde_json::from_str(r#"{ "rgb_speed": -3 }"#).unwrap();
        config.merge_json(value.as_object().unwrap());
        assert_eq!(config.rgb_speed, 4);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{ "alpha": 7.5, "bg_color": {"r": -1.0, "g": 0.5, "b": 2.0} }"#,
        )
        .unwrap();

        let config = store.load().into_config();
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.bg_color, Rgb::new(0.0, 0.5, 1.0));

        let mut low = Config {
            alpha: 0.0,
            ..Config::default()
        };
        low.clamp();
        assert_eq!(low.alpha, MIN_ALPHA);
    }

    #[test]
    fn test_load_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = ConfigStore::at(nested.join(CONFIG_FILE_NAME));

        store.load();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_save_is_stable_and_indented() {
        let json = Config::default().to_json_pretty().unwrap();
        let expected = "{\n    \"alpha\": 0.75,\n    \"text_color\": {\n        \"r\": 0.2,";
        assert!(json.starts_with(expected), "{}", json);
        let order: Vec<usize> = [
            "\"alpha\"",
            "\"text_color\"",
            "\"bg_color\"",
            "\"font\"",
            "\"rgb_speed\"",
            "\"show_clock\"",
            "\"show_sys\"",
        ]
        .iter()
        .map(|k| json.find(k).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(json, Config::default().to_json_pretty().unwrap());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut config = Config::default();
        store.save(&config).unwrap();
        config.show_sys = false;
        store.save(&config).unwrap();

        assert!(!store.load().into_config().show_sys);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::at(dir.path().join("missing").join(CONFIG_FILE_NAME));
        let err = store.save(&Config::default()).unwrap_err();
        assert!(matches!(err, ConfigError::WriteError(_, _)));
    }

    #[test]
    fn test_snapshot_colors() {
        let mut config = Config::default();
        config.snapshot_colors(Color::rgb(0.1, 0.2, 0.3), Color::rgba(0.4, 0.5, 0.6, 0.2));
        assert_eq!(config.text_color, Rgb::new(0.1, 0.2, 0.3));
        assert_eq!(config.bg_color, Rgb::new(0.4, 0.5, 0.6));
        // Alpha lives in its own field
        assert_eq!(config.alpha, 0.75);
    }

    #[test]
    fn test_config_dir_resolution() {
        let home = PathBuf::from("/home/someone");
        assert_eq!(
            config_dir_from(None, Some(home.clone())).unwrap(),
            home.join(".config").join("h3v3n-terminal")
        );
        assert_eq!(
            config_dir_from(Some(OsString::from("/tmp/h3")), Some(home.clone())).unwrap(),
            PathBuf::from("/tmp/h3")
        );
        assert_eq!(
            config_dir_from(Some(OsString::new()), Some(home.clone())).unwrap(),
            home.join(".config").join("h3v3n-terminal")
        );
        assert!(matches!(
            config_dir_from(None, None),
            Err(ConfigError::NoHomeDirectory)
        ));
    }
}
