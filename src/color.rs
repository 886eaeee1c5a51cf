use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::CellGlyphError;

/// Straight (non-premultiplied) stroke color.
///
/// `r`, `g` and `b` are 8-bit intensities. `a` is opacity in the `0.0..=1.0` host
/// convention; it is carried as given and only clamped when converted to raster pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same channels with the opacity replaced. The receiver is left untouched.
    #[must_use]
    pub const fn with_opacity(self, a: f64) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Straight RGBA8 for raster hosts.
    pub fn to_rgba8(self) -> [u8; 4] {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = CellGlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s);
        }

        let inner = s
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| {
                CellGlyphError::validation(format!("color \"{s}\" is not rgba(r, g, b, a)"))
            })?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let [r, g, b, a] = parts.as_slice() else {
            return Err(CellGlyphError::validation(format!(
                "color \"{s}\" must have exactly four channels"
            )));
        };

        fn channel(v: &str) -> Result<u8, CellGlyphError> {
            v.parse::<u8>().map_err(|_| {
                CellGlyphError::validation(format!("invalid color channel \"{v}\" (0..=255)"))
            })
        }

        let a = a
            .parse::<f64>()
            .map_err(|_| CellGlyphError::validation(format!("invalid alpha \"{a}\"")))?;

        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?, a))
    }
}

fn parse_hex(s: &str) -> Result<Color, CellGlyphError> {
    let hex = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, CellGlyphError> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CellGlyphError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !hex.is_ascii() {
        return Err(CellGlyphError::validation("hex color must be ASCII"));
    }

    match hex.len() {
        6 => Ok(Color::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Color::new(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            f64::from(hex_byte(&hex[6..8])?) / 255.0,
        )),
        _ => Err(CellGlyphError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Arr(Vec<f64>),
        }

        fn byte(v: f64) -> Option<u8> {
            (v.fract() == 0.0 && (0.0..=255.0).contains(&v)).then_some(v as u8)
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Arr(v) => {
                let (rgb, a) = match v.as_slice() {
                    [r, g, b] => ([*r, *g, *b], 1.0),
                    [r, g, b, a] => ([*r, *g, *b], *a),
                    _ => {
                        return Err(serde::de::Error::custom(
                            "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                        ));
                    }
                };
                let [r, g, b] = rgb.map(byte);
                match (r, g, b) {
                    (Some(r), Some(g), Some(b)) => Ok(Self::new(r, g, b, a)),
                    _ => Err(serde::de::Error::custom(
                        "color array channels must be integers in 0..=255",
                    )),
                }
            }
        }
    }
}
