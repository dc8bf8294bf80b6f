//! PNG format support.
//!
//! Palette, low bit depth and 16-bit sources are normalised to 8 bits per
//! channel on read. Grayscale is expanded to RGB, grayscale+alpha to RGBA.

use crate::{ImageReader, ImageWriter, IoError, IoResult};
use huevar_core::{Image, PixelFormat};
use std::io::Cursor;

/// PNG reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader;

impl PngReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for PngReader {
    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        buf.truncate(info.buffer_size());

        let (format, pixels) = match (info.color_type, info.bit_depth) {
            (png::ColorType::Rgb, png::BitDepth::Eight) => (PixelFormat::Rgb, buf),
            (png::ColorType::Rgba, png::BitDepth::Eight) => (PixelFormat::Rgba, buf),
            (png::ColorType::Grayscale, png::BitDepth::Eight) => (
                PixelFormat::Rgb,
                buf.iter().flat_map(|&g| [g, g, g]).collect(),
            ),
            (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => (
                PixelFormat::Rgba,
                buf.chunks_exact(2)
                    .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                    .collect(),
            ),
            (color_type, bit_depth) => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{color_type:?} {bit_depth:?}"
                )));
            }
        };

        tracing::debug!(width = info.width, height = info.height, %format, "decoded PNG");
        Ok(Image::from_raw(info.width, info.height, format, pixels)?)
    }
}

/// PNG writer. Keeps the image's channel layout, alpha included.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl PngWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn content_type(&self) -> &'static str {
        "image/png"
    }

    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
        let color_type = match image.format() {
            PixelFormat::Rgb => png::ColorType::Rgb,
            PixelFormat::Rgba => png::ColorType::Rgba,
        };

        let mut buffer = Vec::new();
        let mut encoder = png::Encoder::new(&mut buffer, image.width(), image.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::default());
        encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}
