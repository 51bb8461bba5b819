//! Synthetic image fixtures for unit tests.
//!
//! No binary fixtures are checked in. Every test image is generated on the
//! fly with the `image` crate, small enough that real encodes stay fast.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_gradient_jpeg(&tmp.path().join("hero.jpg"), 200, 150, 90);
//! write_noise_png(&tmp.path().join("shot.png"), 64, 64, 7);
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// RGB gradient JPEG at the given encoder quality.
pub fn write_gradient_jpeg(path: &Path, width: u32, height: u32, quality: u8) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
        ])
    });
    let mut writer = BufWriter::new(File::create(path).unwrap());
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(&img)
        .unwrap();
}

/// Opaque RGB PNG filled with deterministic noise.
///
/// Noise defeats deflate, so even small dimensions give a file well above
/// the size thresholds the pipelines check.
pub fn write_noise_png(path: &Path, width: u32, height: u32, seed: u32) {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let mut next = move || {
        // LCG from Numerical Recipes
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as u8
    };
    let img = RgbImage::from_fn(width, height, |_, _| Rgb([next(), next(), next()]));
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// RGBA PNG with a transparent left half.
pub fn write_rgba_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        Rgba([200, (y * 255 / height.max(1)) as u8, 40, alpha])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}
