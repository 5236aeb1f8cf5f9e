//! Window chrome stylesheet generation
//!
//! The chrome (main container border and background, toolbar, status bar and
//! tab strip) is styled by a stylesheet that is regenerated in full whenever
//! the colors, transparency or font change. The animated border only
//! overrides the border color on top of it.

use crate::Color;

/// Fixed translucent dark used behind the toolbar and status bar
pub const BAR_BACKGROUND: &str = "rgba(10, 10, 10, 0.3)";
/// Inactive tab background
pub const TAB_BACKGROUND: &str = "rgba(30, 30, 30, 0.4)";
/// Text color on the active (checked) tab
pub const ACTIVE_TAB_TEXT: &str = "#000";

/// Inputs for the chrome stylesheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeStyle {
    pub foreground: Color,
    pub background: Color,
    pub alpha: f64,
}

impl ChromeStyle {
    pub fn new(foreground: Color, background: Color, alpha: f64) -> Self {
        Self {
            foreground,
            background,
            alpha,
        }
    }

    /// Border color: the foreground as hex
    pub fn border_color(&self) -> String {
        self.foreground.to_hex()
    }

    /// Main container background as `rgba(r, g, b, alpha)`
    pub fn background_css(&self) -> String {
        let [r, g, b] = self.background.to_rgb8();
        format!("rgba({}, {}, {}, {})", r, g, b, format_alpha(self.alpha))
    }

    /// Full replacement stylesheet for the window chrome
    pub fn stylesheet(&self) -> String {
        let fg = self.border_color();
        let bg = self.background_css();
        format!(
            "#main_container {{\n\
             \x20   background-color: {bg};\n\
             \x20   border: 3px solid {fg};\n\
             \x20   border-radius: 12px;\n\
             \x20   margin: 6px;\n\
             }}\n\
             .h3v3n-bar {{\n\
             \x20   background-color: {BAR_BACKGROUND};\n\
             \x20   color: {fg};\n\
             }}\n\
             notebook tab {{\n\
             \x20   background: {TAB_BACKGROUND};\n\
             \x20   color: {fg};\n\
             }}\n\
             notebook tab:checked {{\n\
             \x20   background: {fg};\n\
             \x20   color: {ACTIVE_TAB_TEXT};\n\
             }}\n"
        )
    }
}

/// Border-only override applied by the hue animation
pub fn border_stylesheet(hex: &str) -> String {
    format!("#main_container {{ border-color: {hex}; margin: 6px; }}\n")
}

/// Alpha is passed through unrounded; `{:?}` keeps the shortest
/// round-tripping form and always prints a decimal point (`1.0`, `0.75`).
fn format_alpha(alpha: f64) -> String {
    format!("{:?}", alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightningcss::stylesheet::{ParserOptions, StyleSheet};

    fn sample() -> ChromeStyle {
        ChromeStyle::new(
            Color::rgb(0.2, 1.0, 0.6),
            Color::rgb(0.0, 0.0, 0.0),
            0.75,
        )
    }

    #[test]
    fn background_uses_literal_alpha() {
        assert_eq!(sample().background_css(), "rgba(0, 0, 0, 0.75)");

        let opaque = ChromeStyle::new(Color::rgb(1.0, 1.0, 1.0), Color::rgb(1.0, 0.5, 0.0), 1.0);
        assert_eq!(opaque.background_css(), "rgba(255, 127, 0, 1.0)");
    }

    #[test]
    fn alpha_is_not_rounded() {
        let style = ChromeStyle::new(Color::default(), Color::default(), 0.123456789);
        assert!(style.background_css().ends_with("0.123456789)"));
    }

    #[test]
    fn border_color_is_foreground_hex() {
        assert_eq!(sample().border_color(), "#33ff99");
    }

    #[test]
    fn stylesheet_contains_every_chrome_rule() {
        let css = sample().stylesheet();
        assert!(css.contains("#main_container {"));
        assert!(css.contains("border: 3px solid #33ff99;"));
        assert!(css.contains("background-color: rgba(0, 0, 0, 0.75);"));
        assert!(css.contains(".h3v3n-bar {"));
        assert!(css.contains("background-color: rgba(10, 10, 10, 0.3);"));
        assert!(css.contains("notebook tab {"));
        assert!(css.contains("background: rgba(30, 30, 30, 0.4);"));
        assert!(css.contains("notebook tab:checked {"));
        assert!(css.contains("background: #33ff99;"));
        assert!(css.contains("color: #000;"));
    }

    #[test]
    fn stylesheet_is_deterministic() {
        assert_eq!(sample().stylesheet(), sample().stylesheet());
    }

    #[test]
    fn stylesheet_is_valid_css() {
        let css = sample().stylesheet();
        let sheet = StyleSheet::parse(&css, ParserOptions::default()).unwrap();
        assert_eq!(sheet.rules.0.len(), 4);
    }

    #[test]
    fn border_override_is_valid_css() {
        let css = border_stylesheet("#ff4c4c");
        assert_eq!(css, "#main_container { border-color: #ff4c4c; margin: 6px; }\n");
        let sheet = StyleSheet::parse(&css, ParserOptions::default()).unwrap();
        assert_eq!(sheet.rules.0.len(), 1);
    }
}
