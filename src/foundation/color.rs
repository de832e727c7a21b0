use crate::foundation::error::{BraynsError, BraynsResult};
use serde::{Deserialize, Serialize};

/// Opaque RGB color with normalized `[0, 1]` channels, serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color3 {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

/// RGBA color with normalized `[0, 1]` channels, serialized as `[r, g, b, a]`.
///
/// Alpha is straight (not premultiplied).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color4 {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Default for Color4 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color3 {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Pure red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Build a color from normalized channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(unorm(r), unorm(g), unorm(b))
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(s: &str) -> BraynsResult<Self> {
        let c = parse_hex(s)?;
        if c.a != 1.0 {
            return Err(BraynsError::validation(
                "hex color for an RGB value must be #RRGGBB",
            ));
        }
        Ok(c.without_alpha())
    }

    /// Attach an alpha channel.
    pub fn with_alpha(self, a: f64) -> Color4 {
        Color4::new(self.r, self.g, self.b, a)
    }

    /// Channels as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl Color4 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Build a color from normalized channels.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from straight-alpha 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(unorm(r), unorm(g), unorm(b), unorm(a))
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> BraynsResult<Self> {
        parse_hex(s)
    }

    /// Drop the alpha channel.
    pub fn without_alpha(self) -> Color3 {
        Color3::new(self.r, self.g, self.b)
    }

    /// Replace the alpha channel.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color3> for Color4 {
    fn from(c: Color3) -> Self {
        c.with_alpha(1.0)
    }
}

impl Serialize for Color3 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl Serialize for Color4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Hex(String),
    Arr(Vec<f64>),
}

impl<'de> Deserialize<'de> for Color3 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::new(r, g, b)),
                &[r, g, b, a] if a == 1.0 => Ok(Self::new(r, g, b)),
                &[_, _, _, _] => Err(serde::de::Error::custom(
                    "rgb array with alpha must be opaque ([r,g,b,1])",
                )),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b]) or 4 ([r,g,b,1])",
                )),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Color4 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::new(r, g, b, 1.0)),
                &[r, g, b, a] => Ok(Self::new(r, g, b, a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn unorm(c: u8) -> f64 {
    f64::from(c) / 255.0
}

fn parse_hex(s: &str) -> BraynsResult<Color4> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> BraynsResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| BraynsError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(BraynsError::validation("hex color must be ASCII"));
    }
    let (r, g, b, a) = match s.len() {
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err(BraynsError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            ));
        }
    };
    Ok(Color4::from_rgba8(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
