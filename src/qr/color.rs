//! Hex color parsing for QR styling

use crate::error::{Error, Result};
use image::{Rgb, Rgba};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An RGBA color used to paint QR modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel, 255 is opaque
    pub a: u8,
}

impl Color {
    /// Opaque color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(Error::InvalidColor(value.to_string())),
        };

        let bytes = hex::decode(&expanded).map_err(|_| Error::InvalidColor(value.to_string()))?;

        match bytes.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Self {
                r: *r,
                g: *g,
                b: *b,
                a: *a,
            }),
            _ => Err(Error::InvalidColor(value.to_string())),
        }
    }

    /// Whether the alpha channel is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Squared euclidean distance over all four channels
    pub fn distance_sq(&self, other: &Color) -> u32 {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).unsigned_abs();
        let (dr, dg, db, da) = (
            d(self.r, other.r),
            d(self.g, other.g),
            d(self.b, other.b),
            d(self.a, other.a),
        );
        dr * dr + dg * dg + db * db + da * da
    }

    /// Convert to an `image` RGB pixel, dropping alpha
    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    /// Convert to an `image` RGBA pixel
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{}", hex::encode([self.r, self.g, self.b]))
        } else {
            write!(f, "#{}", hex::encode([self.r, self.g, self.b, self.a]))
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(serde::de::Error::custom)
    }
}
