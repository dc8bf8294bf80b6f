//! Error types for hue operations.

use huevar_io::IoError;
use thiserror::Error;

/// Error type for hue operations.
///
/// A batch either succeeds as a whole or reports exactly one of these.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Source buffer could not be turned into an image.
    #[error(transparent)]
    Core(#[from] huevar_core::Error),

    /// The encoder failed for one variant; the whole batch is discarded.
    #[error("failed to encode variant for hue {hue}: {source}")]
    Encoding {
        /// Hue value whose variant failed.
        hue: i32,
        /// Underlying encoder error.
        #[source]
        source: IoError,
    },

    /// A hue list must name at least one shift.
    #[error("hue list is empty")]
    EmptyHueList,

    /// A hue list could not be parsed.
    #[error("invalid hue list: {0}")]
    InvalidHueList(String),
}

/// Result type for hue operations.
pub type OpsResult<T> = Result<T, OpsError>;
