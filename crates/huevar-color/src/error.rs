//! Error types for color operations.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    /// HSL components outside `[0, 360) x [0, 1] x [0, 1]`.
    ///
    /// Callers are expected to normalise hue before converting, so this
    /// signals a programming error rather than bad user input.
    #[error("HSL value out of domain: h={h}, s={s}, l={l}")]
    PreconditionViolation {
        /// Hue in degrees.
        h: f64,
        /// Saturation.
        s: f64,
        /// Lightness.
        l: f64,
    },

    /// A palette entry is not a `#rrggbb` hex string.
    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    /// A palette was built from an empty list.
    #[error("palette must contain at least one color")]
    EmptyPalette,
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
