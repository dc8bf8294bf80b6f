//! RGB <-> HSL conversion.
//!
//! Hue is in degrees `[0, 360)`, saturation and lightness are fractions in
//! `[0, 1]`. All arithmetic is `f64`; results are rounded half away from zero
//! when going back to 8-bit channels.
//!
//! # Achromatic Colors
//!
//! When all three channels are equal, hue has no direction. [`rgb_to_hsl`]
//! fixes `h = 0` and `s = 0` in that case, so gray pixels convert without a
//! division by zero and come back unchanged for any hue.
//!
//! # Example
//!
//! ```rust
//! use huevar_color::{hsl_to_rgb, rgb_to_hsl};
//!
//! let hsl = rgb_to_hsl(255, 0, 0);
//! assert_eq!(hsl.h, 0.0);
//! assert_eq!(hsl_to_rgb(hsl.with_hue(120.0)), [0, 255, 0]);
//! ```

use huevar_core::Pixel;

use crate::error::{ColorError, ColorResult};

/// Color in Hue-Saturation-Lightness form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Lightness, `[0, 1]`.
    pub l: f64,
}

impl Hsl {
    /// Creates a new HSL color. No domain check is performed.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Converts the RGB channels of a pixel. Alpha is ignored.
    #[inline]
    pub fn from_pixel(px: Pixel) -> Self {
        rgb_to_hsl(px.r, px.g, px.b)
    }

    /// Returns a copy with a different hue.
    #[inline]
    pub const fn with_hue(self, h: f64) -> Self {
        Self { h, ..self }
    }

    /// Whether saturation is zero.
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0
    }

    /// Whether every component lies inside its documented domain.
    #[inline]
    pub fn in_domain(&self) -> bool {
        (0.0..360.0).contains(&self.h)
            && (0.0..=1.0).contains(&self.s)
            && (0.0..=1.0).contains(&self.l)
    }
}

/// Converts 8-bit RGB to HSL.
///
/// Total over every `u8` triple.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    // Ties resolve to red first, then green.
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h / 6.0 * 360.0, s, l)
}

/// Converts HSL to 8-bit RGB.
///
/// The input must already be in domain: hue in `[0, 360)`, saturation and
/// lightness in `[0, 1]`. Out-of-domain input is a caller bug; it trips a
/// debug assertion and otherwise produces saturated channel values. Use
/// [`try_hsl_to_rgb`] when the input is not known to be valid.
pub fn hsl_to_rgb(hsl: Hsl) -> [u8; 3] {
    debug_assert!(hsl.in_domain(), "HSL out of domain: {hsl:?}");

    let Hsl { h, s, l } = hsl;
    if s == 0.0 {
        let v = to_channel(l);
        return [v, v, v];
    }

    let h = h / 360.0;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    ]
}

/// Checked variant of [`hsl_to_rgb`].
///
/// # Errors
///
/// [`ColorError::PreconditionViolation`] if any component is outside its
/// domain (NaN included).
pub fn try_hsl_to_rgb(hsl: Hsl) -> ColorResult<[u8; 3]> {
    if !hsl.in_domain() {
        return Err(ColorError::PreconditionViolation {
            h: hsl.h,
            s: hsl.s,
            l: hsl.l,
        });
    }
    Ok(hsl_to_rgb(hsl))
}

/// Piecewise-linear hue helper.
#[inline]
fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Scales a `[0, 1]` fraction to a rounded 8-bit channel.
#[inline]
fn to_channel(v: f64) -> u8 {
    // `as` saturates, which only matters for out-of-domain input.
    (v * 255.0).round() as u8
}
