//! Pixel types and channel layouts.
//!
//! # Types
//!
//! - [`Pixel`] - One 8-bit RGBA sample
//! - [`PixelFormat`] - Runtime channel layout of an image buffer
//!
//! # Memory Layout
//!
//! Buffers are interleaved. An RGB buffer stores `[R G B R G B ...]`, an RGBA
//! buffer `[R G B A R G B A ...]`. Reading a pixel out of an RGB buffer yields
//! an opaque alpha of 255; writing one back drops the alpha.
//!
//! ```
//! use huevar_core::{Pixel, PixelFormat};
//!
//! let px = PixelFormat::Rgb.read(&[10, 20, 30]);
//! assert_eq!(px, Pixel::new(10, 20, 30, 255));
//! ```

use std::fmt;

/// Runtime channel layout of an 8-bit image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Three channels: red, green, blue.
    Rgb,
    /// Four channels: red, green, blue, alpha.
    #[default]
    Rgba,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel.
    #[inline]
    pub const fn channels(&self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Whether this layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Looks up the layout for a channel count.
    ///
    /// Returns `None` for anything other than 3 or 4.
    #[inline]
    pub const fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Reads one pixel from an interleaved chunk of exactly `channels()` bytes.
    #[inline]
    pub fn read(&self, chunk: &[u8]) -> Pixel {
        debug_assert_eq!(chunk.len(), self.channels());
        match self {
            Self::Rgb => Pixel::new(chunk[0], chunk[1], chunk[2], u8::MAX),
            Self::Rgba => Pixel::new(chunk[0], chunk[1], chunk[2], chunk[3]),
        }
    }

    /// Writes one pixel into an interleaved chunk of exactly `channels()` bytes.
    #[inline]
    pub fn write(&self, chunk: &mut [u8], pixel: Pixel) {
        debug_assert_eq!(chunk.len(), self.channels());
        chunk[0] = pixel.r;
        chunk[1] = pixel.g;
        chunk[2] = pixel.b;
        if let Self::Rgba = self {
            chunk[3] = pixel.a;
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One 8-bit RGBA sample.
///
/// Every channel is a full `u8`, so the `[0, 255]` range holds by construction.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Red channel value.
    pub r: u8,
    /// Green channel value.
    pub g: u8,
    /// Blue channel value.
    pub b: u8,
    /// Alpha channel value.
    pub a: u8,
}

impl Pixel {
    /// Create a new RGBA pixel.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque pixel (alpha = 255).
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Create a grayscale pixel with equal RGB values.
    #[inline]
    pub const fn gray(v: u8, a: u8) -> Self {
        Self::new(v, v, v, a)
    }

    /// Get the RGB channels (discarding alpha).
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Replace the RGB channels, keeping alpha.
    #[inline]
    pub const fn with_rgb(self, rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], self.a)
    }

    /// Get RGBA values as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Whether all three color channels are equal (gray).
    #[inline]
    pub const fn is_achromatic(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl fmt::Debug for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixel")
            .field("r", &self.r)
            .field("g", &self.g)
            .field("b", &self.b)
            .field("a", &self.a)
            .finish()
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(px: Pixel) -> Self {
        px.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_channels() {
        assert_eq!(PixelFormat::Rgb.channels(), 3);
        assert_eq!(PixelFormat::Rgba.channels(), 4);
        assert!(PixelFormat::Rgba.has_alpha());
        assert!(!PixelFormat::Rgb.has_alpha());
    }

    #[test]
    fn test_format_from_channels() {
        assert_eq!(PixelFormat::from_channels(3), Some(PixelFormat::Rgb));
        assert_eq!(PixelFormat::from_channels(4), Some(PixelFormat::Rgba));
        assert_eq!(PixelFormat::from_channels(1), None);
        assert_eq!(PixelFormat::from_channels(2), None);
    }

    #[test]
    fn test_read_write_rgb_drops_alpha() {
        let mut chunk = [0u8; 3];
        PixelFormat::Rgb.write(&mut chunk, Pixel::new(1, 2, 3, 4));
        assert_eq!(chunk, [1, 2, 3]);
        assert_eq!(PixelFormat::Rgb.read(&chunk), Pixel::new(1, 2, 3, 255));
    }

    #[test]
    fn test_read_write_rgba() {
        let mut chunk = [0u8; 4];
        PixelFormat::Rgba.write(&mut chunk, Pixel::new(1, 2, 3, 4));
        assert_eq!(chunk, [1, 2, 3, 4]);
        assert_eq!(PixelFormat::Rgba.read(&chunk), Pixel::new(1, 2, 3, 4));
    }

    #[test]
    fn test_with_rgb_keeps_alpha() {
        let px = Pixel::new(10, 20, 30, 77).with_rgb([1, 2, 3]);
        assert_eq!(px, Pixel::new(1, 2, 3, 77));
    }

    #[test]
    fn test_achromatic() {
        assert!(Pixel::gray(128, 0).is_achromatic());
        assert!(!Pixel::opaque(128, 128, 129).is_achromatic());
    }

    #[test]
    fn test_display() {
        assert_eq!(Pixel::new(1, 2, 3, 4).to_string(), "RGBA(1, 2, 3, 4)");
        assert_eq!(PixelFormat::Rgb.to_string(), "RGB");
    }
}
