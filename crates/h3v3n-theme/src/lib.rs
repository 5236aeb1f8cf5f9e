//! H3V3N Theme - colors and window chrome styling
//!
//! This crate provides:
//! - The `Color` type shared by the config store, the tab surfaces and the chrome
//! - Hex parsing and truncating 8-bit hex formatting
//! - HSV conversion for the animated border
//! - Stylesheet generation for the window chrome

pub mod parser;
pub mod style;

pub use parser::{ThemeParseError, parse_hex_color};
pub use style::{ChromeStyle, border_stylesheet};

/// RGBA color with 0.0-1.0 float channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Convert HSV (all components 0.0-1.0) to an opaque color
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::rgb(r, g, b)
    }

    /// 8-bit channels, truncated rather than rounded
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
        ]
    }

    /// `#rrggbb` in lowercase, alpha ignored
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Clamp every channel into 0.0-1.0
    pub fn clamped(self) -> Self {
        Self {
            r: clamp_unit(self.r),
            g: clamp_unit(self.g),
            b: clamp_unit(self.b),
            a: clamp_unit(self.a),
        }
    }
}

/// floor(c * 255) after clamping; NaN maps to 0
fn channel_to_u8(c: f64) -> u8 {
    (clamp_unit(c) * 255.0) as u8
}

fn clamp_unit(c: f64) -> f64 {
    if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) }
}
