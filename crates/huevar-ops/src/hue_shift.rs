//! Hue rotation of whole images.
//!
//! Every pixel is converted to HSL, its hue rotated by a whole number of
//! degrees, and converted back. Alpha is copied through untouched, as are
//! the dimensions and pixel format.
//!
//! Pixels are independent, so with the `parallel` feature rows are spread
//! over the rayon pool. Both paths produce the same bytes.
//!
//! # Example
//!
//! ```rust
//! use huevar_core::{Image, Pixel, PixelFormat};
//! use huevar_ops::hue_shift::shift_hue;
//!
//! let red = Image::filled(2, 2, PixelFormat::Rgba, Pixel::new(255, 0, 0, 40));
//! let green = shift_hue(&red, 120);
//! assert_eq!(green.pixel(1, 1), Pixel::new(0, 255, 0, 40));
//! assert_eq!(red.pixel(1, 1), Pixel::new(255, 0, 0, 40));
//! ```

use huevar_color::{Hsl, hsl_to_rgb};
use huevar_core::{Image, Pixel};

/// Reduces a hue in degrees into `[0, 360)`.
///
/// The final guard catches `-tiny + 360.0` rounding up to exactly 360.
#[inline]
pub fn normalize_hue(h: f64) -> f64 {
    let mut h = h % 360.0;
    if h < 0.0 {
        h += 360.0;
    }
    if h >= 360.0 {
        h = 0.0;
    }
    h
}

/// Rotates the hue of one pixel. Alpha is kept.
///
/// The delta is reduced to `[0, 360)` in integer arithmetic first, so
/// `delta` and `delta + 360 * k` give identical results.
#[inline]
pub fn shift_pixel(px: Pixel, delta: i32) -> Pixel {
    let hsl = Hsl::from_pixel(px);
    let h = normalize_hue(hsl.h + delta.rem_euclid(360) as f64);
    px.with_rgb(hsl_to_rgb(hsl.with_hue(h)))
}

/// Returns a hue-rotated copy of `image`.
///
/// Zero-area images yield a zero-area result.
pub fn shift_hue(image: &Image, delta: i32) -> Image {
    #[cfg(feature = "parallel")]
    {
        image.par_map_pixels(|px| shift_pixel(px, delta))
    }
    #[cfg(not(feature = "parallel"))]
    {
        shift_hue_serial(image, delta)
    }
}

/// Single-threaded [`shift_hue`].
pub fn shift_hue_serial(image: &Image, delta: i32) -> Image {
    image.map_pixels(|px| shift_pixel(px, delta))
}
