//! Golden hash tests for hue shift output.
//!
//! The reference hashes come from an independent float64 model of the
//! RGB -> HSL -> RGB round trip with half-away-from-zero rounding. Any change
//! to rounding, branch order or hue wrapping shows up here.

use huevar_core::{Image, Pixel, PixelFormat};
use huevar_ops::shift_hue;
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// Test input
// ---------------------------------------------------------------------------

/// 16x16 RGBA pattern; every pixel has a distinct hue, saturation or alpha.
fn sample_16() -> Image {
    let mut data = Vec::with_capacity(16 * 16 * 4);
    for y in 0..16u32 {
        for x in 0..16u32 {
            data.extend_from_slice(&[
                (x * 16) as u8,
                (y * 16) as u8,
                ((x * y * 7) % 256) as u8,
                (255 - (x + y)) as u8,
            ]);
        }
    }
    Image::from_raw(16, 16, PixelFormat::Rgba, data).unwrap()
}

fn hash(image: &Image) -> String {
    hex::encode(Sha256::digest(image.data()))
}

// ---------------------------------------------------------------------------
// Golden data
// ---------------------------------------------------------------------------

struct Golden {
    hue: i32,
    hash: &'static str,
    px_3_5: [u8; 4],
    px_15_15: [u8; 4],
}

const GOLDEN: &[Golden] = &[
    Golden {
        hue: 0,
        hash: "edf229910c371aa653b0f42d050ff4b3618a0f061709249d400e550f86a3fb76",
        px_3_5: [48, 80, 105, 247],
        px_15_15: [240, 240, 39, 225],
    },
    Golden {
        hue: 20,
        hash: "ee445b6b8ab6c32264e2c498808d2ff9d5246fc5cf5b6b4784e1bb4a0311c390",
        px_3_5: [48, 61, 105, 247],
        px_15_15: [173, 240, 39, 225],
    },
    Golden {
        hue: 140,
        hash: "56b5ba4ce175e7de3319a21ce230f2ef78fa7aec6c2ec3502c5febcca01d20e4",
        px_3_5: [105, 48, 61, 247],
        px_15_15: [39, 173, 240, 225],
    },
    Golden {
        hue: 340,
        hash: "05732d44c2de6609729dda11c649baee3f0039f9dcf73fb4ff43d3f5c1c56e84",
        px_3_5: [48, 99, 105, 247],
        px_15_15: [240, 173, 39, 225],
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_golden_source_hash() {
    assert_eq!(hash(&sample_16()), GOLDEN[0].hash);
}

#[test]
fn test_golden_hue_shift() {
    let source = sample_16();
    for golden in GOLDEN {
        let shifted = shift_hue(&source, golden.hue);
        assert_eq!(
            shifted.pixel(3, 5),
            Pixel::from_array(golden.px_3_5),
            "hue {} at (3,5)",
            golden.hue
        );
        assert_eq!(
            shifted.pixel(15, 15),
            Pixel::from_array(golden.px_15_15),
            "hue {} at (15,15)",
            golden.hue
        );
        assert_eq!(hash(&shifted), golden.hash, "hue {}", golden.hue);
    }
}

#[test]
fn test_golden_wraparound() {
    let source = sample_16();
    assert_eq!(hash(&shift_hue(&source, -20)), GOLDEN[3].hash);
    assert_eq!(hash(&shift_hue(&source, 380)), GOLDEN[1].hash);
    assert_eq!(hash(&shift_hue(&source, 360)), GOLDEN[0].hash);
    assert_eq!(hash(&shift_hue(&source, -220)), GOLDEN[2].hash);
}

#[test]
fn test_golden_rgb_matches_rgba() {
    let rgba = sample_16();
    let rgb_data: Vec<u8> = rgba
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let rgb = Image::from_raw(16, 16, PixelFormat::Rgb, rgb_data).unwrap();

    let a = shift_hue(&rgba, 140);
    let b = shift_hue(&rgb, 140);
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        assert_eq!(pa.with_rgb([pb.r, pb.g, pb.b]), pa);
    }
}
