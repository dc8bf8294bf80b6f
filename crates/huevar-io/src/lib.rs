//! # huevar-io
//!
//! Image decoding and encoding for the hue variation pipeline.
//!
//! - **JPEG** - Lossy output format of every variant
//! - **PNG** - Lossless, keeps alpha
//!
//! # Architecture
//!
//! - [`ImageReader`] - Trait for format readers
//! - [`ImageWriter`] - Trait for format writers; the encoder seam used by
//!   `huevar-ops` batch generation
//! - [`decode`] / [`read`] / [`write`] - Format auto-detection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use huevar_io::{read, write};
//!
//! let image = read("photo.png")?;
//! write("photo.jpg", &image)?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};

use huevar_core::Image;
use std::path::Path;

/// Decodes an in-memory image, sniffing the format from magic bytes.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] when the bytes are neither PNG nor JPEG,
/// otherwise any decoder failure.
pub fn decode(bytes: &[u8]) -> IoResult<Image> {
    let format = Format::from_bytes(bytes);
    tracing::trace!(%format, len = bytes.len(), "decode");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::PngReader::new().read_from_memory(bytes),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader::new().read_from_memory(bytes),

        _ => Err(IoError::UnsupportedFormat(format!(
            "unrecognised header {:02x?}",
            &bytes[..bytes.len().min(4)]
        ))),
    }
}

/// Reads an image from a file, auto-detecting the format.
///
/// Magic bytes win over the extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "read");
    decode(&std::fs::read(path)?)
}

/// Writes an image to a file, choosing the format from the extension.
///
/// JPEG output uses quality 90.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    tracing::debug!(path = %path.display(), %format, "write");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::PngWriter::new().write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegWriter::new().write(path, image),

        _ => Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}
