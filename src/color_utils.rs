//! Color utility functions shared across the engine.
//!
//! Layer colors, threshold band colors and marker fills all use [`Rgb`],
//! which round-trips through the `#rrggbb` notation used in configuration.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    ///
    /// # Returns
    /// `None` if the string is not six hex digits after the optional `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{}'", raw)))
    }
}

/// Status palette used by the default threshold bands.
pub mod palette {
    use super::Rgb;

    /// Good coverage
    pub const SUCCESS: Rgb = Rgb::new(0x22, 0xc5, 0x5e);
    /// Partial coverage
    pub const WARNING: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);
    /// Poor coverage, also the fallback band
    pub const DANGER: Rgb = Rgb::new(0xef, 0x44, 0x44);
    /// Marker outline
    pub const OUTLINE: Rgb = Rgb::new(0xff, 0xff, 0xff);
}
