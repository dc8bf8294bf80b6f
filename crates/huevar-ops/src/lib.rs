//! # huevar-ops
//!
//! Hue operations on whole images.
//!
//! # Modules
//!
//! - [`hue_shift`] - Rotate the hue of every pixel of an image
//! - [`variation`] - Apply a fixed hue list to one source, encode each result
//!
//! # Example
//!
//! ```rust
//! use huevar_core::{Image, Pixel, PixelFormat};
//! use huevar_io::jpeg::JpegWriter;
//! use huevar_ops::{HueShiftSpec, VariationBatchGenerator};
//!
//! let source = Image::filled(16, 16, PixelFormat::Rgb, Pixel::opaque(200, 100, 50));
//! let generator = VariationBatchGenerator::new(HueShiftSpec::default());
//! let results = generator.generate(&source, "photo", &JpegWriter::new()).unwrap();
//!
//! assert_eq!(results.len(), 17);
//! assert_eq!(results[0].path, "photo.20.jpg");
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` feature (default) both the pixels of one variant and
//! the variants of one batch are computed on the rayon pool. Results are
//! collected by index, so output order and bytes match the serial build.
//!
//! Nothing in this crate logs; failures are returned to the caller.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod hue_shift;
pub mod variation;

pub use error::{OpsError, OpsResult};
pub use hue_shift::{normalize_hue, shift_hue, shift_hue_serial, shift_pixel};
pub use variation::{HueShiftSpec, VariationBatchGenerator, VariationResult, variant_name};
