//! # huevar-core
//!
//! Core types for hue variation processing.
//!
//! This crate provides the foundational types used throughout the huevar crates:
//!
//! - [`Pixel`] - One 8-bit RGBA sample
//! - [`PixelFormat`] - Runtime channel layout (RGB or RGBA)
//! - [`Image`] - Owned, row-major 8-bit image buffer
//! - [`Error`] - Buffer validation errors
//!
//! ## Design Philosophy
//!
//! An [`Image`] owns its pixel buffer outright. Cloning an image copies the
//! buffer, so a variant derived from a source never aliases it:
//!
//! ```rust
//! use huevar_core::{Image, Pixel, PixelFormat};
//!
//! let source = Image::filled(4, 4, PixelFormat::Rgba, Pixel::new(200, 100, 50, 255));
//! let variant = source.map_pixels(|px| Pixel { r: px.b, b: px.r, ..px });
//!
//! assert_eq!(source.pixel(0, 0), Pixel::new(200, 100, 50, 255));
//! assert_eq!(variant.pixel(0, 0), Pixel::new(50, 100, 200, 255));
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! huevar-core (this crate)
//!    ^
//!    |
//!    +-- huevar-color (RGB <-> HSL, palette)
//!    +-- huevar-io (JPEG/PNG codecs)
//!    +-- huevar-ops (hue shift, batch generation)
//!    +-- huevar-server, huevar-cli
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` - Enable parallel pixel mapping (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

// Re-exports for convenience
pub use error::{Error, Result};
pub use image::Image;
pub use pixel::{Pixel, PixelFormat};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use huevar_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::pixel::{Pixel, PixelFormat};
}
