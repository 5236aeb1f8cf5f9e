//! Bundled color themes
//!
//! Each theme is a foreground/background pair compiled into the binary.
//! The catalog is read-only at runtime.

use h3v3n_theme::{Color, ThemeParseError, parse_hex_color};

/// Bundled theme data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledTheme {
    pub name: &'static str,
    pub foreground: &'static str,
    pub background: &'static str,
}

impl BundledTheme {
    const fn new(name: &'static str, foreground: &'static str, background: &'static str) -> Self {
        Self {
            name,
            foreground,
            background,
        }
    }

    /// Parsed (foreground, background), both opaque
    pub fn colors(&self) -> Result<(Color, Color), ThemeParseError> {
        Ok((
            parse_hex_color(self.foreground)?,
            parse_hex_color(self.background)?,
        ))
    }
}

/// Dracula theme - purple on dark slate
pub const DRACULA: BundledTheme = BundledTheme::new("Dracula", "#bd93f9", "#282a36");

/// All bundled themes
pub const ALL_THEMES: &[BundledTheme] = &[
    BundledTheme::new("Matrix Rain", "#00ff41", "#000000"),
    BundledTheme::new("Cyberpunk", "#f0e68c", "#28003c"),
    DRACULA,
    BundledTheme::new("Nordic", "#88c0d0", "#2e3440"),
    BundledTheme::new("Glitch Red", "#ff0000", "#0f0505"),
    BundledTheme::new("Ocean Blue", "#00d4ff", "#051020"),
    BundledTheme::new("Retro Gold", "#ffcc00", "#151000"),
    BundledTheme::new("Neon Pink", "#ff00ff", "#100010"),
    BundledTheme::new("Ghost White", "#ffffff", "#111111"),
    BundledTheme::new("Toxic Waste", "#adff2f", "#001a00"),
    BundledTheme::new("Blood Moon", "#ff4d4d", "#1a0505"),
    BundledTheme::new("Ice Castle", "#afeeee", "#002b36"),
    BundledTheme::new("Deep Forest", "#2ecc71", "#0a1f0a"),
    BundledTheme::new("Lava Flows", "#e67e22", "#1a0900"),
    BundledTheme::new("Midnight Sky", "#34495e", "#010a14"),
    BundledTheme::new("Monokai Pro", "#a6e22e", "#272822"),
    BundledTheme::new("Vampire", "#9b59b6", "#1a001a"),
    BundledTheme::new("Slate", "#94a3b8", "#0f172a"),
];

/// Get a bundled theme by exact name
pub fn get_bundled_theme(name: &str) -> Option<&'static BundledTheme> {
    ALL_THEMES.iter().find(|t| t.name == name)
}

/// All bundled theme names in catalog order
pub fn bundled_theme_names() -> Vec<&'static str> {
    ALL_THEMES.iter().map(|t| t.name).collect()
}

/// Theme names in alphabetical order, as the settings dialog lists them
pub fn sorted_theme_names() -> Vec<&'static str> {
    let mut names = bundled_theme_names();
    names.sort_unstable();
    names
}
