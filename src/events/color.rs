use crate::foundation::core::Rgb8;
use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parse `#RRGGBB` (case-insensitive, `#` optional). `#RGB` shorthand is expanded.
pub(crate) fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    match s.len() {
        6 => Ok(Rgb8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        3 => {
            let nibble = |i: usize| hex_byte(&s[i..i + 1]).map(|v| v * 17);
            Ok(Rgb8::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => Err("hex color must be #RRGGBB or #RGB (case-insensitive)".to_owned()),
    }
}

impl FromStr for Rgb8 {
    type Err = PaintlapseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map_err(PaintlapseError::validation)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) => Ok(Rgb8::new(r, g, b)),
        }
    }
}

/// How a paint record names its color: a palette slot or a literal hex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColorRef {
    /// Index into the day's palette.
    Index(usize),
    /// Literal color.
    Rgb(Rgb8),
}

/// Ordered list of colors a day's events may reference by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Rgb8>);

impl Palette {
    /// Build a palette from colors.
    pub fn new(colors: Vec<Rgb8>) -> Self {
        Self(colors)
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a color reference against this palette.
    pub fn resolve(&self, color: ColorRef) -> PaintlapseResult<Rgb8> {
        match color {
            ColorRef::Rgb(c) => Ok(c),
            ColorRef::Index(i) => self.0.get(i).copied().ok_or_else(|| {
                PaintlapseError::validation(format!(
                    "palette index {i} out of range (palette has {} colors)",
                    self.0.len()
                ))
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/color.rs"]
mod tests;
