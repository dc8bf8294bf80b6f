//! JPEG format support.
//!
//! JPEG is the single output encoding of the variation pipeline. Decoding
//! accepts RGB, grayscale and CMYK sources and always yields an RGB
//! [`Image`]; encoding drops alpha.
//!
//! # Example
//!
//! ```rust
//! use huevar_core::{Image, Pixel, PixelFormat};
//! use huevar_io::jpeg::{JpegReader, JpegWriter};
//! use huevar_io::{ImageReader, ImageWriter};
//!
//! let image = Image::filled(8, 8, PixelFormat::Rgba, Pixel::new(90, 90, 90, 10));
//! let bytes = JpegWriter::with_quality(95).write_to_memory(&image).unwrap();
//! let back = JpegReader::new().read_from_memory(&bytes).unwrap();
//! assert_eq!(back.dimensions(), (8, 8));
//! ```

use crate::{ImageReader, ImageWriter, IoError, IoResult};
use huevar_core::{Image, PixelFormat};
use std::io::{BufReader, Cursor};

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// JPEG reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for JpegReader {
    /// Checks for JPEG magic bytes (0xFF, 0xD8, 0xFF).
    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(&[0xFF, 0xD8, 0xFF])
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let rgb = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels,
            jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            jpeg_decoder::PixelFormat::L16 => l16_to_rgb(&pixels),
            jpeg_decoder::PixelFormat::CMYK32 => pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 1.0 - cmyk[3] as f32 / 255.0;
                    let ch = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0) as u8;
                    [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2])]
                })
                .collect(),
        };

        tracing::debug!(width, height, source = ?info.pixel_format, "decoded JPEG");
        Ok(Image::from_raw(width, height, PixelFormat::Rgb, rgb)?)
    }
}

/// Native-endian 16-bit gray samples to 8-bit RGB, keeping the high byte.
fn l16_to_rgb(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(2)
        .flat_map(|l16| {
            let g = (u16::from_ne_bytes([l16[0], l16[1]]) >> 8) as u8;
            [g, g, g]
        })
        .collect()
}

/// JPEG writer with a fixed quality.
#[derive(Debug, Clone, Copy)]
pub struct JpegWriter {
    quality: u8,
}

impl JpegWriter {
    /// Creates a writer with quality 90.
    pub fn new() -> Self {
        Self::with_quality(DEFAULT_QUALITY)
    }

    /// Creates a writer with the given quality, clamped to 1..=100.
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Configured quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for JpegWriter {
    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn content_type(&self) -> &'static str {
        "image/jpeg"
    }

    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let (width, height) = image.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(IoError::EncodeError(format!(
                "{width}x{height} exceeds JPEG limit of 65535"
            )));
        };

        let rgb: Vec<u8> = match image.format() {
            PixelFormat::Rgb => image.data().to_vec(),
            PixelFormat::Rgba => image
                .data()
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect(),
        };

        let mut buffer = Vec::new();
        Encoder::new(&mut buffer, self.quality)
            .encode(&rgb, w, h, ColorType::Rgb)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        tracing::trace!(width, height, quality = self.quality, bytes = buffer.len(), "encoded JPEG");
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huevar_core::Pixel;

    fn gradient(width: u32, height: u32) -> Image {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 128]);
            }
        }
        Image::from_raw(width, height, PixelFormat::Rgb, data).unwrap()
    }

    #[test]
    fn test_l16_keeps_high_byte() {
        let samples: [u16; 3] = [0x0000, 0x80FF, 0xFF01];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        assert_eq!(
            l16_to_rgb(&bytes),
            vec![0x00, 0x00, 0x00, 0x80, 0x80, 0x80, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_memory_roundtrip() {
        let image = gradient(32, 32);
        let bytes = JpegWriter::new().write_to_memory(&image).unwrap();
        assert!(JpegReader::new().can_read(&bytes));

        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.dimensions(), (32, 32));
        assert_eq!(loaded.format(), PixelFormat::Rgb);
    }

    #[test]
    fn test_flat_color_survives() {
        let image = Image::filled(16, 16, PixelFormat::Rgba, Pixel::new(128, 128, 128, 0));
        let bytes = JpegWriter::with_quality(95).write_to_memory(&image).unwrap();
        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        for px in loaded.pixels() {
            assert!(px.r.abs_diff(128) <= 3, "{px}");
            assert_eq!(px.a, 255);
        }
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        JpegWriter::new().write(&path, &gradient(8, 4)).unwrap();
        let loaded = JpegReader::new().read(&path).unwrap();
        assert_eq!(loaded.dimensions(), (8, 4));
    }

    #[test]
    fn test_quality_clamped() {
        assert_eq!(JpegWriter::with_quality(0).quality(), 1);
        assert_eq!(JpegWriter::with_quality(200).quality(), 100);
        assert_eq!(JpegWriter::default().quality(), DEFAULT_QUALITY);
    }

    #[test]
    fn test_quality_affects_size() {
        let image = gradient(32, 32);
        let low = JpegWriter::with_quality(10).write_to_memory(&image).unwrap();
        let high = JpegWriter::with_quality(100).write_to_memory(&image).unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_too_large() {
        let image = Image::new(70_000, 1, PixelFormat::Rgb);
        assert!(matches!(
            JpegWriter::new().write_to_memory(&image),
            Err(IoError::EncodeError(_))
        ));
    }

    #[test]
    fn test_garbage_fails() {
        assert!(matches!(
            JpegReader::new().read_from_memory(&[0xFF, 0xD8, 0xFF, 0x00, 0x01]),
            Err(IoError::DecodeError(_))
        ));
    }
}
