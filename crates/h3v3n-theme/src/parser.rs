//! Color string parsing
//!
//! The theme catalog stores its colors as `#rrggbb`.

use thiserror::Error;

use crate::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeParseError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

fn hex_byte(digits: &str, original: &str) -> Result<f64, ThemeParseError> {
    u8::from_str_radix(digits, 16)
        .map(|v| v as f64 / 255.0)
        .map_err(|_| ThemeParseError::InvalidColor(original.to_string()))
}

/// Parse an opaque `#rrggbb` color
pub fn parse_hex_color(hex: &str) -> Result<Color, ThemeParseError> {
    let original = hex;
    let hex = hex.trim().trim_start_matches('#');

    if !hex.is_ascii() || hex.len() != 6 {
        log::debug!("Unrecognized color value {:?}", original);
        return Err(ThemeParseError::InvalidColor(original.to_string()));
    }

    Ok(Color::rgb(
        hex_byte(&hex[0..2], original)?,
        hex_byte(&hex[2..4], original)?,
        hex_byte(&hex[4..6], original)?,
    ))
}
