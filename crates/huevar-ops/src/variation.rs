//! Batch generation of hue variants.
//!
//! A [`VariationBatchGenerator`] applies every hue of a [`HueShiftSpec`] to
//! the same source image, encodes each result with an [`ImageWriter`] and
//! returns one [`VariationResult`] per hue, in list order.
//!
//! # Guarantees
//!
//! - Each variant is derived from the source, never from another variant.
//! - Output order equals hue-list order, even when variants are computed in
//!   parallel.
//! - Duplicate hues produce duplicate results.
//! - Any failure aborts the batch; no partial list is ever returned.
//!
//! # Example
//!
//! ```rust
//! use huevar_core::{Image, Pixel, PixelFormat};
//! use huevar_io::png::PngWriter;
//! use huevar_ops::{HueShiftSpec, VariationBatchGenerator};
//!
//! let source = Image::filled(4, 4, PixelFormat::Rgb, Pixel::opaque(200, 100, 50));
//! let spec = HueShiftSpec::new(vec![20, 40]).unwrap();
//! let results = VariationBatchGenerator::new(spec)
//!     .generate(&source, "shots/cat", &PngWriter::new())
//!     .unwrap();
//!
//! assert_eq!(results[0].path, "shots/cat.20.png");
//! assert_eq!(results[1].path, "shots/cat.40.png");
//! ```

use std::fmt;
use std::str::FromStr;

use huevar_core::{Image, PixelFormat};
use huevar_io::ImageWriter;
use serde::{Deserialize, Serialize};

use crate::hue_shift::shift_hue;
use crate::{OpsError, OpsResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// First hue of the default list.
pub const DEFAULT_HUE_START: i32 = 20;
/// Last hue of the default list.
pub const DEFAULT_HUE_END: i32 = 340;
/// Spacing of the default list.
pub const DEFAULT_HUE_STEP: usize = 20;

/// Ordered, non-empty list of hue rotations in degrees.
///
/// Order is significant: it fixes output order and naming. Values are not
/// deduplicated and may lie outside `[0, 360)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct HueShiftSpec {
    hues: Vec<i32>,
}

impl HueShiftSpec {
    /// Creates a hue list.
    ///
    /// # Errors
    ///
    /// [`OpsError::EmptyHueList`] if `hues` is empty.
    pub fn new(hues: Vec<i32>) -> OpsResult<Self> {
        if hues.is_empty() {
            return Err(OpsError::EmptyHueList);
        }
        Ok(Self { hues })
    }

    /// Hue values in order.
    #[inline]
    pub fn hues(&self) -> &[i32] {
        &self.hues
    }

    /// Number of hue values.
    #[inline]
    pub fn len(&self) -> usize {
        self.hues.len()
    }

    /// Always `false` for a constructed list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hues.is_empty()
    }
}

/// 20, 40, ... 340.
impl Default for HueShiftSpec {
    fn default() -> Self {
        Self {
            hues: (DEFAULT_HUE_START..=DEFAULT_HUE_END)
                .step_by(DEFAULT_HUE_STEP)
                .collect(),
        }
    }
}

impl TryFrom<Vec<i32>> for HueShiftSpec {
    type Error = OpsError;

    fn try_from(hues: Vec<i32>) -> OpsResult<Self> {
        Self::new(hues)
    }
}

impl From<HueShiftSpec> for Vec<i32> {
    fn from(spec: HueShiftSpec) -> Self {
        spec.hues
    }
}

/// Parses a comma-separated list such as `"20,-40, 60"`.
impl FromStr for HueShiftSpec {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let hues = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i32>()
                    .map_err(|e| OpsError::InvalidHueList(format!("'{part}': {e}")))
            })
            .collect::<OpsResult<Vec<_>>>()?;
        Self::new(hues)
    }
}

impl fmt::Display for HueShiftSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hue) in self.hues.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{hue}")?;
        }
        Ok(())
    }
}

/// One encoded variant.
#[derive(Clone, PartialEq, Eq)]
pub struct VariationResult {
    /// Hue rotation that produced this variant.
    pub hue: i32,
    /// `{base}.{hue}.{ext}`.
    pub path: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for VariationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariationResult")
            .field("hue", &self.hue)
            .field("path", &self.path)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Builds the output name of one variant.
///
/// ```rust
/// assert_eq!(huevar_ops::variant_name("a/b", -20, "jpg"), "a/b.-20.jpg");
/// ```
pub fn variant_name(base: &str, hue: i32, extension: &str) -> String {
    format!("{base}.{hue}.{extension}")
}

/// Applies a fixed hue list to source images.
#[derive(Debug, Clone, Default)]
pub struct VariationBatchGenerator {
    spec: HueShiftSpec,
}

impl VariationBatchGenerator {
    /// Creates a generator for the given hue list.
    pub fn new(spec: HueShiftSpec) -> Self {
        Self { spec }
    }

    /// Configured hue list.
    pub fn spec(&self) -> &HueShiftSpec {
        &self.spec
    }

    /// Generates and encodes one variant per configured hue.
    ///
    /// # Errors
    ///
    /// [`OpsError::Encoding`] if `writer` fails for any hue. Nothing else is
    /// returned in that case.
    pub fn generate<W>(
        &self,
        source: &Image,
        base_name: &str,
        writer: &W,
    ) -> OpsResult<Vec<VariationResult>>
    where
        W: ImageWriter + Sync + ?Sized,
    {
        let render = |&hue: &i32| -> OpsResult<VariationResult> {
            let variant = shift_hue(source, hue);
            let bytes = writer
                .write_to_memory(&variant)
                .map_err(|source| OpsError::Encoding { hue, source })?;
            Ok(VariationResult {
                hue,
                path: variant_name(base_name, hue, writer.extension()),
                bytes,
            })
        };

        #[cfg(feature = "parallel")]
        {
            self.spec.hues.par_iter().map(render).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.spec.hues.iter().map(render).collect()
        }
    }

    /// Validates a raw interleaved buffer, then runs [`Self::generate`].
    ///
    /// # Errors
    ///
    /// [`OpsError::Core`] wrapping `InvalidPixelFormat` if `data` does not
    /// hold exactly `width * height * format.channels()` bytes.
    pub fn generate_from_raw<W>(
        &self,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
        base_name: &str,
        writer: &W,
    ) -> OpsResult<Vec<VariationResult>>
    where
        W: ImageWriter + Sync + ?Sized,
    {
        let source = Image::from_raw(width, height, format, data)?;
        self.generate(&source, base_name, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huevar_core::Pixel;
    use huevar_io::{IoError, IoResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Emits the raw buffer so tests can compare pixels.
    struct RawWriter;

    impl ImageWriter for RawWriter {
        fn extension(&self) -> &'static str {
            "jpg"
        }

        fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
            Ok(image.data().to_vec())
        }
    }

    /// Fails on its n-th call (0-based), whichever hue that is.
    struct FailingWriter {
        calls: AtomicUsize,
        fail_at: usize,
    }

    impl ImageWriter for FailingWriter {
        fn extension(&self) -> &'static str {
            "jpg"
        }

        fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == self.fail_at {
                return Err(IoError::EncodeError("disk on fire".into()));
            }
            Ok(image.data().to_vec())
        }
    }

    fn source() -> Image {
        let data: Vec<u8> = (0..8 * 8 * 4).map(|i| (i * 37 % 256) as u8).collect();
        Image::from_raw(8, 8, PixelFormat::Rgba, data).unwrap()
    }

    fn spec(hues: &[i32]) -> HueShiftSpec {
        HueShiftSpec::new(hues.to_vec()).unwrap()
    }

    #[test]
    fn test_default_spec() {
        let spec = HueShiftSpec::default();
        assert_eq!(spec.len(), 17);
        assert_eq!(spec.hues()[0], 20);
        assert_eq!(spec.hues()[16], 340);
        assert!(spec.hues().windows(2).all(|w| w[1] - w[0] == 20));
    }

    #[test]
    fn test_empty_spec_rejected() {
        assert!(matches!(HueShiftSpec::new(vec![]), Err(OpsError::EmptyHueList)));
        assert!(serde_json::from_str::<HueShiftSpec>("[]").is_err());
        assert!(matches!("".parse::<HueShiftSpec>(), Err(OpsError::EmptyHueList)));
    }

    #[test]
    fn test_parse_spec() {
        let spec: HueShiftSpec = "20, -40,60,".parse().unwrap();
        assert_eq!(spec.hues(), &[20, -40, 60]);
        assert_eq!(spec.to_string(), "20,-40,60");
        assert!(matches!(
            "20,forty".parse::<HueShiftSpec>(),
            Err(OpsError::InvalidHueList(_))
        ));
    }

    #[test]
    fn test_spec_serde() {
        let spec: HueShiftSpec = serde_yaml::from_str("[10, 350]").unwrap();
        assert_eq!(spec.hues(), &[10, 350]);
        assert_eq!(serde_json::to_string(&spec).unwrap(), "[10,350]");
    }

    #[test]
    fn test_batch_ordering_and_names() {
        let results = VariationBatchGenerator::new(spec(&[20, 40, 60]))
            .generate(&source(), "base", &RawWriter)
            .unwrap();
        let paths: Vec<_> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["base.20.jpg", "base.40.jpg", "base.60.jpg"]);
        let hues: Vec<_> = results.iter().map(|r| r.hue).collect();
        assert_eq!(hues, [20, 40, 60]);
    }

    #[test]
    fn test_variants_are_not_cumulative() {
        let src = source();
        let results = VariationBatchGenerator::new(spec(&[20, 40]))
            .generate(&src, "b", &RawWriter)
            .unwrap();
        assert_eq!(results[0].bytes, shift_hue(&src, 20).into_raw());
        assert_eq!(results[1].bytes, shift_hue(&src, 40).into_raw());
    }

    #[test]
    fn test_batch_independence() {
        let src = source();
        let ab = VariationBatchGenerator::new(spec(&[20, 40]))
            .generate(&src, "b", &RawWriter)
            .unwrap();
        let ba = VariationBatchGenerator::new(spec(&[40, 20]))
            .generate(&src, "b", &RawWriter)
            .unwrap();
        assert_eq!(ab[1], ba[0]);
        assert_eq!(ab[0], ba[1]);
    }

    #[test]
    fn test_duplicates_kept() {
        let results = VariationBatchGenerator::new(spec(&[90, 90]))
            .generate(&source(), "dup", &RawWriter)
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn test_failure_is_atomic() {
        let writer = FailingWriter {
            calls: AtomicUsize::new(0),
            fail_at: 1,
        };
        let err = VariationBatchGenerator::new(spec(&[20, 40, 60]))
            .generate(&source(), "b", &writer)
            .unwrap_err();
        match err {
            OpsError::Encoding { hue, source } => {
                assert!([20, 40, 60].contains(&hue));
                assert!(source.to_string().contains("disk on fire"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generate_from_raw_rejects_bad_buffer() {
        let err = VariationBatchGenerator::default()
            .generate_from_raw(4, 4, PixelFormat::Rgba, vec![0; 63], "b", &RawWriter)
            .unwrap_err();
        assert!(matches!(
            err,
            OpsError::Core(huevar_core::Error::InvalidPixelFormat {
                expected: 64,
                got: 63,
                ..
            })
        ));
    }

    #[test]
    fn test_generate_from_raw() {
        let results = VariationBatchGenerator::new(spec(&[120]))
            .generate_from_raw(1, 1, PixelFormat::Rgb, vec![255, 0, 0], "r", &RawWriter)
            .unwrap();
        assert_eq!(results[0].bytes, vec![0, 255, 0]);
    }

    #[test]
    fn test_zero_area_source() {
        let results = VariationBatchGenerator::new(spec(&[20, 40]))
            .generate(&Image::new(0, 0, PixelFormat::Rgb), "z", &RawWriter)
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.bytes.is_empty()));
    }

    #[test]
    fn test_dyn_writer() {
        let writer: &(dyn ImageWriter + Sync) = &RawWriter;
        let results = VariationBatchGenerator::new(spec(&[0]))
            .generate(&Image::filled(1, 1, PixelFormat::Rgb, Pixel::opaque(1, 2, 3)), "d", writer)
            .unwrap();
        assert_eq!(results[0].bytes, vec![1, 2, 3]);
    }
}
