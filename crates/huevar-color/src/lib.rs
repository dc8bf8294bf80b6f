//! # huevar-color
//!
//! Per-pixel color math and the display palette for hue variation.
//!
//! - **HSL conversion** - [`rgb_to_hsl`], [`hsl_to_rgb`] and the checked
//!   [`try_hsl_to_rgb`]
//! - **Palette** - [`ColorPalette`], a curated list of `#rrggbb` colors
//!
//! Everything here is pure: no state, no I/O, no logging.
//!
//! # Architecture
//!
//! ```text
//!   huevar-ops (hue shift)
//!        |
//!   huevar-color
//!        |
//!   huevar-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use huevar_color::{hsl_to_rgb, rgb_to_hsl};
//!
//! let hsl = rgb_to_hsl(200, 100, 50);
//! let rotated = hsl.with_hue((hsl.h + 180.0) % 360.0);
//! assert_eq!(hsl_to_rgb(rotated), [50, 150, 200]);
//! ```
//!
//! # Rounding
//!
//! Channels are rounded with [`f64::round`] (half away from zero). Since every
//! intermediate value is non-negative this is the same as rounding half up.

#![warn(missing_docs)]

pub mod error;
pub mod hsl;
pub mod palette;

pub use error::{ColorError, ColorResult};
pub use hsl::{Hsl, hsl_to_rgb, rgb_to_hsl, try_hsl_to_rgb};
pub use palette::{ColorPalette, DEFAULT_PALETTE, PaletteColor};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::error::{ColorError, ColorResult};
    pub use crate::hsl::{Hsl, hsl_to_rgb, rgb_to_hsl, try_hsl_to_rgb};
    pub use crate::palette::{ColorPalette, PaletteColor};
}
