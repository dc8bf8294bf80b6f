//! Error types for huevar-core operations.
//!
//! The only fallible operations at this layer are building an [`Image`]
//! from a raw buffer and sizing a new one. Both report through [`Error`].
//!
//! # Usage
//!
//! ```rust
//! use huevar_core::{Error, Image, PixelFormat};
//!
//! let err = Image::from_raw(2, 2, PixelFormat::Rgb, vec![0; 5]).unwrap_err();
//! assert!(matches!(err, Error::InvalidPixelFormat { expected: 12, got: 5, .. }));
//! ```
//!
//! # Used By
//!
//! - [`crate::image::Image`] - Buffer validation
//! - `huevar-io` - Decoded buffers
//! - `huevar-ops` - Raw-buffer batch generation
//!
//! [`Image`]: crate::image::Image

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing image buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer length does not match `width * height * channels`.
    ///
    /// Fatal to any batch built from the buffer.
    #[error(
        "invalid pixel format: {width}x{height} with {channels} channels needs {expected} bytes, got {got}"
    )]
    InvalidPixelFormat {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Channels per pixel
        channels: usize,
        /// Expected buffer length in bytes
        expected: usize,
        /// Actual buffer length in bytes
        got: usize,
    },

    /// Dimensions overflow the addressable buffer size.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count is neither 3 (RGB) nor 4 (RGBA).
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error describes a buffer/layout mismatch.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPixelFormat { .. } | Self::UnsupportedChannels(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pixel_format_message() {
        let err = Error::InvalidPixelFormat {
            width: 10,
            height: 20,
            channels: 4,
            expected: 800,
            got: 799,
        };
        let msg = err.to_string();
        assert!(msg.contains("10x20"));
        assert!(msg.contains("800"));
        assert!(msg.contains("799"));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(u32::MAX, u32::MAX, "overflow");
        assert!(err.to_string().contains("overflow"));
        assert!(!err.is_format_error());
    }

    #[test]
    fn test_unsupported_channels() {
        let err = Error::UnsupportedChannels(2);
        assert_eq!(err.to_string(), "unsupported channel count: 2");
        assert!(err.is_format_error());
    }
}
