//! I/O traits for image readers and writers.
//!
//! These traits define the interface for format-specific implementations.
//! [`ImageWriter`] is also the encoder seam of the batch generator: anything
//! that can turn an [`Image`] into bytes can be plugged in there.

use crate::IoResult;
use huevar_core::Image;
use std::path::Path;

/// Trait for image format readers.
pub trait ImageReader {
    /// Checks magic bytes at the start of a buffer.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image>;

    /// Reads an image from a file path.
    fn read(&self, path: &Path) -> IoResult<Image> {
        let data = std::fs::read(path)?;
        self.read_from_memory(&data)
    }
}

/// Trait for image format writers.
///
/// # Example
///
/// ```rust
/// use huevar_core::Image;
/// use huevar_io::{ImageWriter, IoResult};
///
/// /// Emits the raw buffer, handy in tests.
/// struct RawWriter;
///
/// impl ImageWriter for RawWriter {
///     fn extension(&self) -> &'static str {
///         "raw"
///     }
///
///     fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
///         Ok(image.data().to_vec())
///     }
/// }
/// ```
pub trait ImageWriter {
    /// File extension of the output, without the dot.
    fn extension(&self) -> &'static str;

    /// MIME type of the output.
    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    /// Encodes an image to memory.
    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>>;

    /// Encodes an image and writes it to a file path.
    fn write(&self, path: &Path, image: &Image) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
