//! Curated display palette.
//!
//! A [`ColorPalette`] is a fixed, ordered list of `#rrggbb` colors shown to
//! clients next to a batch of variants. It is configuration, not derived from
//! pixel data, and its length need not match the hue list: entry `i` of the
//! palette says nothing about hue `i`.
//!
//! ```rust
//! use huevar_color::ColorPalette;
//!
//! let palette = ColorPalette::default();
//! let reversed = palette.reversed();
//! assert_eq!(reversed.colors().first(), palette.colors().last());
//! assert_eq!(reversed.reversed(), palette);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, ColorResult};

/// Colors served when no palette is configured.
pub const DEFAULT_PALETTE: [&str; 17] = [
    "#3d34e8", "#8f32dd", "#8f32dd", "#da27b7", "#fa4db2", "#fa4db2", "#f33441", "#ed663d",
    "#e78431", "#e78431", "#58d06e", "#58d06e", "#58d06e", "#58d06e", "#58d06e", "#34e9d1",
    "#36bfe8",
];

/// One validated `#rrggbb` color.
///
/// The original spelling (including letter case) is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaletteColor(String);

impl PaletteColor {
    /// Parses a `#rrggbb` hex string.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidColor`] for anything else.
    pub fn parse(s: impl Into<String>) -> ColorResult<Self> {
        let s = s.into();
        let valid = s.len() == 7
            && s.starts_with('#')
            && s[1..].bytes().all(|b| b.is_ascii_hexdigit());
        if valid {
            Ok(Self(s))
        } else {
            Err(ColorError::InvalidColor(s))
        }
    }

    /// Hex string as configured.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decoded RGB channels.
    pub fn rgb(&self) -> [u8; 3] {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(1), channel(3), channel(5)]
    }
}

impl FromStr for PaletteColor {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PaletteColor {
    type Error = ColorError;

    fn try_from(s: String) -> ColorResult<Self> {
        Self::parse(s)
    }
}

impl From<PaletteColor> for String {
    fn from(c: PaletteColor) -> Self {
        c.0
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable ordered list of display colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PaletteColor>", into = "Vec<PaletteColor>")]
pub struct ColorPalette {
    colors: Vec<PaletteColor>,
}

impl ColorPalette {
    /// Builds a palette from validated colors.
    ///
    /// # Errors
    ///
    /// [`ColorError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<PaletteColor>) -> ColorResult<Self> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Parses and builds a palette from hex strings.
    pub fn from_hex<I, S>(colors: I) -> ColorResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors = colors
            .into_iter()
            .map(PaletteColor::parse)
            .collect::<ColorResult<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Colors in configured order.
    #[inline]
    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    /// A new palette in reverse order. `self` is left as is.
    pub fn reversed(&self) -> Self {
        Self {
            colors: self.colors.iter().rev().cloned().collect(),
        }
    }

    /// Colors as plain strings, in configured order.
    pub fn to_strings(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.0.clone()).collect()
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false` for a constructed palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over the colors in configured order.
    pub fn iter(&self) -> std::slice::Iter<'_, PaletteColor> {
        self.colors.iter()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|s| PaletteColor(s.to_string()))
                .collect(),
        }
    }
}

impl TryFrom<Vec<PaletteColor>> for ColorPalette {
    type Error = ColorError;

    fn try_from(colors: Vec<PaletteColor>) -> ColorResult<Self> {
        Self::new(colors)
    }
}

impl From<ColorPalette> for Vec<PaletteColor> {
    fn from(p: ColorPalette) -> Self {
        p.colors
    }
}

impl<'a> IntoIterator for &'a ColorPalette {
    type Item = &'a PaletteColor;
    type IntoIter = std::slice::Iter<'a, PaletteColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
