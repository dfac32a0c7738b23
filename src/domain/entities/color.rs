//! Hex color parsing for style configuration.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `#RRGGBB` or `RRGGBB`.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").unwrap());

/// Error returned when a color string is not a six-digit hex value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color format: '{0}'")]
pub struct ColorFormatError(pub String);

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorFormatError`] for anything else.
    pub fn from_hex(value: &str) -> Result<Self, ColorFormatError> {
        let digits = HEX_COLOR_REGEX
            .captures(value.trim())
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| ColorFormatError(value.to_string()))?;

        let packed = u32::from_str_radix(digits.as_str(), 16)
            .map_err(|_| ColorFormatError(value.to_string()))?;

        Ok(Self::rgb(
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        ))
    }

    /// Parses a color, falling back to black on malformed input.
    ///
    /// Style colors come straight from user requests, so a bad value must not
    /// abort a render.
    pub fn parse_or_black(value: &str) -> Self {
        match Self::from_hex(value) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!("{}, using black instead", e);
                Self::BLACK
            }
        }
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
