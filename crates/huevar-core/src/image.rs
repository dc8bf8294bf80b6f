//! Image buffer type.
//!
//! # Memory Layout
//!
//! Images store pixels in **row-major** order, top-to-bottom:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! For RGBA images, alpha is interleaved: `[R G B A R G B A ...]`
//!
//! # Ownership
//!
//! Unlike a shared copy-on-write buffer, [`Image`] owns a plain `Vec<u8>`.
//! Cloning copies the pixels, and [`Image::map_pixels`] always writes into a
//! freshly allocated buffer, so a derived image never aliases its source.
//!
//! # Usage
//!
//! ```rust
//! use huevar_core::{Image, Pixel, PixelFormat};
//!
//! let mut img = Image::new(64, 32, PixelFormat::Rgba);
//! img.set_pixel(10, 5, Pixel::new(255, 128, 0, 255));
//!
//! assert_eq!(img.pixel(10, 5), Pixel::new(255, 128, 0, 255));
//! assert_eq!(img.data().len(), 64 * 32 * 4);
//! ```

use crate::{Error, Pixel, PixelFormat, Result};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Owned 8-bit image buffer with a runtime pixel format.
///
/// Width, height and format are fixed at construction; only pixel values
/// can change afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    /// Interleaved pixel data
    data: Vec<u8>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Channel layout
    format: PixelFormat,
}

/// Computes `width * height * channels`, failing on overflow.
fn buffer_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(format.channels()))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows usize"))
}

impl Image {
    /// Creates a new image filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * channels` overflows `usize`.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            data: vec![0; len],
            width,
            height,
            format,
        }
    }

    /// Creates an image from an existing interleaved buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPixelFormat`] if `data.len()` is not exactly
    /// `width * height * format.channels()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use huevar_core::{Image, PixelFormat};
    ///
    /// let img = Image::from_raw(2, 1, PixelFormat::Rgb, vec![255, 0, 0, 0, 255, 0]).unwrap();
    /// assert_eq!(img.pixel_count(), 2);
    /// ```
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height, format)?;
        if data.len() != expected {
            return Err(Error::InvalidPixelFormat {
                width,
                height,
                channels: format.channels(),
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Creates an image from a buffer whose layout is given as a channel count.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedChannels`] for counts other than 3 or 4, otherwise
    /// as [`Image::from_raw`].
    pub fn from_channels(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        let format =
            PixelFormat::from_channels(channels).ok_or(Error::UnsupportedChannels(channels))?;
        Self::from_raw(width, height, format, data)
    }

    /// Creates an image filled with a specific pixel value.
    pub fn filled(width: u32, height: u32, format: PixelFormat, pixel: Pixel) -> Self {
        let mut img = Self::new(width, height, format);
        img.fill(pixel);
        img
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its pixel buffer.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels()
    }

    /// Returns the pixel at (x, y).
    ///
    /// RGB images report an alpha of 255.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        self.format.read(&self.data[offset..offset + self.channels()])
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y). Alpha is dropped for RGB images.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let n = self.channels();
        self.format.write(&mut self.data[offset..offset + n], pixel);
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: Pixel) {
        let format = self.format;
        for chunk in self.data.chunks_exact_mut(format.channels()) {
            format.write(chunk, pixel);
        }
    }

    /// Iterates over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let format = self.format;
        self.data
            .chunks_exact(format.channels())
            .map(move |chunk| format.read(chunk))
    }

    /// Builds a new image by applying `f` to every pixel.
    ///
    /// The source is left untouched; the result has the same dimensions and
    /// format and owns a freshly allocated buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use huevar_core::{Image, Pixel, PixelFormat};
    ///
    /// let img = Image::filled(4, 4, PixelFormat::Rgb, Pixel::opaque(10, 20, 30));
    /// let inverted = img.map_pixels(|px| Pixel::opaque(255 - px.r, 255 - px.g, 255 - px.b));
    /// assert_eq!(inverted.pixel(3, 3), Pixel::opaque(245, 235, 225));
    /// ```
    pub fn map_pixels<F>(&self, f: F) -> Image
    where
        F: Fn(Pixel) -> Pixel,
    {
        let format = self.format;
        let n = format.channels();
        let mut out = vec![0u8; self.data.len()];
        for (src, dst) in self.data.chunks_exact(n).zip(out.chunks_exact_mut(n)) {
            format.write(dst, f(format.read(src)));
        }
        Image {
            data: out,
            width: self.width,
            height: self.height,
            format,
        }
    }

    /// Parallel version of [`Image::map_pixels`].
    ///
    /// Rows are distributed across the rayon pool. Each output pixel depends
    /// only on its own input pixel, so the result is bit-identical to the
    /// serial version.
    #[cfg(feature = "rayon")]
    pub fn par_map_pixels<F>(&self, f: F) -> Image
    where
        F: Fn(Pixel) -> Pixel + Sync + Send,
    {
        let format = self.format;
        let n = format.channels();
        let row_len = self.width as usize * n;
        let mut out = vec![0u8; self.data.len()];
        if row_len > 0 {
            out.par_chunks_mut(row_len)
                .zip(self.data.par_chunks(row_len))
                .for_each(|(dst_row, src_row)| {
                    for (src, dst) in src_row.chunks_exact(n).zip(dst_row.chunks_exact_mut(n)) {
                        format.write(dst, f(format.read(src)));
                    }
                });
        }
        Image {
            data: out,
            width: self.width,
            height: self.height,
            format,
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new() {
        let img = Image::new(100, 50, PixelFormat::Rgb);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.data().len(), 15000);
    }

    #[test]
    fn test_image_filled() {
        let img = Image::filled(10, 10, PixelFormat::Rgba, Pixel::new(1, 2, 3, 4));
        assert_eq!(img.pixel(0, 0), Pixel::new(1, 2, 3, 4));
        assert_eq!(img.pixel(9, 9), Pixel::new(1, 2, 3, 4));
    }

    #[test]
    fn test_image_set_get_pixel() {
        let mut img = Image::new(10, 10, PixelFormat::Rgba);
        img.set_pixel(5, 5, Pixel::new(255, 0, 0, 255));
        assert_eq!(img.pixel(5, 5), Pixel::new(255, 0, 0, 255));
        assert_eq!(img.pixel(0, 0), Pixel::new(0, 0, 0, 0));
        assert_eq!(img.get_pixel(10, 0), None);
    }

    #[test]
    fn test_image_from_raw() {
        let img = Image::from_raw(2, 2, PixelFormat::Rgba, vec![7; 16]).unwrap();
        assert_eq!(img.pixel(1, 1), Pixel::new(7, 7, 7, 7));
    }

    #[test]
    fn test_image_from_raw_wrong_size() {
        let err = Image::from_raw(100, 100, PixelFormat::Rgba, vec![0; 100]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPixelFormat {
                width: 100,
                height: 100,
                channels: 4,
                expected: 40_000,
                got: 100,
            }
        );
    }

    #[test]
    fn test_image_from_channels() {
        assert!(Image::from_channels(1, 1, 3, vec![0; 3]).is_ok());
        assert_eq!(
            Image::from_channels(1, 1, 2, vec![0; 2]).unwrap_err(),
            Error::UnsupportedChannels(2)
        );
    }

    #[test]
    fn test_zero_area() {
        let img = Image::from_raw(0, 7, PixelFormat::Rgb, Vec::new()).unwrap();
        assert!(img.is_empty());
        let mapped = img.map_pixels(|px| px);
        assert_eq!(mapped.dimensions(), (0, 7));
        assert!(mapped.data().is_empty());
    }

    #[test]
    fn test_map_pixels_leaves_source() {
        let src = Image::filled(3, 3, PixelFormat::Rgba, Pixel::new(10, 20, 30, 40));
        let out = src.map_pixels(|px| Pixel::new(px.b, px.g, px.r, px.a));
        assert_eq!(src.pixel(1, 1), Pixel::new(10, 20, 30, 40));
        assert_eq!(out.pixel(1, 1), Pixel::new(30, 20, 10, 40));
        assert_eq!(out.format(), PixelFormat::Rgba);
    }

    #[test]
    fn test_map_pixels_rgb_ignores_alpha_output() {
        let src = Image::filled(2, 2, PixelFormat::Rgb, Pixel::opaque(1, 2, 3));
        let out = src.map_pixels(|px| Pixel::new(px.r, px.g, px.b, 0));
        assert_eq!(out.data(), &[1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_map_matches_serial() {
        let data: Vec<u8> = (0..37 * 23 * 4).map(|i| (i * 31 % 256) as u8).collect();
        let img = Image::from_raw(37, 23, PixelFormat::Rgba, data).unwrap();
        let f = |px: Pixel| Pixel::new(px.g, px.b, px.r, px.a);
        assert_eq!(img.map_pixels(f), img.par_map_pixels(f));
    }

    #[test]
    fn test_pixels_iterator() {
        let img = Image::from_raw(2, 1, PixelFormat::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let px: Vec<Pixel> = img.pixels().collect();
        assert_eq!(px, vec![Pixel::opaque(1, 2, 3), Pixel::opaque(4, 5, 6)]);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Image::filled(2, 2, PixelFormat::Rgb, Pixel::opaque(1, 1, 1));
        let mut b = a.clone();
        b.set_pixel(0, 0, Pixel::opaque(9, 9, 9));
        assert_eq!(a.pixel(0, 0), Pixel::opaque(1, 1, 1));
        assert_eq!(b.pixel(0, 0), Pixel::opaque(9, 9, 9));
    }
}
