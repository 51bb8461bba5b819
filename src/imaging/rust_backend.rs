//! Pure-Rust-first codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (JPEG, PNG) | `image` crate decoders |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → WebP (lossy) | `webp` crate (libwebp), sharp-YUV for smart subsampling |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Encode → PNG | `imagequant` palette + `image` PNG encoder + `oxipng` recompression |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{EncodeFormat, EncodeParams, PngCompression, Quality};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbaImage};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Production backend built on the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, sniffing the format from its bytes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Drop to 8-bit RGB or RGBA, the layouts every encoder here accepts.
fn to_8bit(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn save_image(img: &DynamicImage, path: &Path, format: &EncodeFormat) -> Result<(), BackendError> {
    match *format {
        EncodeFormat::WebP {
            quality,
            smart_subsample,
        } => save_webp(img, path, quality, smart_subsample),
        EncodeFormat::Avif { quality, speed } => save_avif(img, path, quality, speed),
        EncodeFormat::Jpeg { quality } => save_jpeg(img, path, quality),
        EncodeFormat::Png {
            palette,
            quality,
            compression,
        } => save_png(img, path, palette, quality, compression),
    }
}

/// Lossy WebP through libwebp's advanced config.
fn save_webp(
    img: &DynamicImage,
    path: &Path,
    quality: Quality,
    smart_subsample: bool,
) -> Result<(), BackendError> {
    let (width, height) = (img.width(), img.height());
    let rgba;
    let rgb;
    let encoder = if img.color().has_alpha() {
        rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height)
    } else {
        rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height)
    };

    let mut config = libwebp_sys::WebPConfig::new().map_err(|_| {
        BackendError::ProcessingFailed("WebP encoder config init failed".to_string())
    })?;
    config.quality = quality.value() as f32;
    config.use_sharp_yuv = i32::from(smart_subsample);

    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {:?}", e)))?;
    std::fs::write(path, &*encoded)?;
    Ok(())
}

/// Encode and save as AVIF using rav1e.
fn save_avif(
    img: &DynamicImage,
    path: &Path,
    quality: Quality,
    speed: u8,
) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = AvifEncoder::new_with_speed_quality(&mut writer, speed, quality.value() as u8);
    to_8bit(img.clone())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("AVIF encode failed: {}", e)))?;
    writer.flush()?;
    Ok(())
}

fn save_jpeg(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.value() as u8);
    // JPEG has no alpha channel; flatten anything that is not plain gray/RGB.
    let flattened = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img.clone(),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };
    flattened
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    writer.flush()?;
    Ok(())
}

/// PNG: optional palette quantisation, then a fast encode that oxipng recompresses.
///
/// oxipng's reductions turn the ≤256-colour RGBA buffer into an indexed PNG.
fn save_png(
    img: &DynamicImage,
    path: &Path,
    palette: bool,
    quality: Quality,
    compression: PngCompression,
) -> Result<(), BackendError> {
    let source = if palette {
        quantize_palette(img, quality)?
    } else {
        to_8bit(img.clone())
    };

    let mut raw = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut raw, CompressionType::Fast, PngFilterType::Adaptive);
    source
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))?;

    let options = oxipng::Options::from_preset(compression.oxipng_preset());
    let optimized = oxipng::optimize_from_memory(&raw, &options)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG optimize failed: {}", e)))?;
    std::fs::write(path, optimized)?;
    Ok(())
}

/// Reduce to at most 256 colours with libimagequant.
///
/// `quality` is the ceiling: the quantiser uses as few colours as it can
/// while staying at or under it, and never refuses (minimum 0).
fn quantize_palette(img: &DynamicImage, quality: Quality) -> Result<DynamicImage, BackendError> {
    let quant_err = |e: imagequant::Error| {
        BackendError::ProcessingFailed(format!("Palette quantization failed: {:?}", e))
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels: Vec<imagequant::RGBA> = rgba
        .pixels()
        .map(|p| imagequant::RGBA::new(p[0], p[1], p[2], p[3]))
        .collect();

    let mut attrs = imagequant::new();
    attrs
        .set_quality(0, quality.value() as u8)
        .map_err(quant_err)?;
    let mut image = attrs
        .new_image(pixels, width as usize, height as usize, 0.0)
        .map_err(quant_err)?;
    let mut result = attrs.quantize(&mut image).map_err(quant_err)?;
    result.set_dithering_level(1.0).map_err(quant_err)?;
    let (palette, indices) = result.remapped(&mut image).map_err(quant_err)?;

    let data: Vec<u8> = indices
        .iter()
        .flat_map(|&i| {
            let c = palette[i as usize];
            [c.r, c.g, c.b, c.a]
        })
        .collect();

    RgbaImage::from_raw(width, height, data)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| {
            BackendError::ProcessingFailed("Quantized buffer does not match image size".into())
        })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn encode(&self, params: &EncodeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let img = match params.resize {
            Some((width, height)) => img.resize_exact(width, height, FilterType::Lanczos3),
            None => img,
        };
        save_image(&img, &params.output, &params.format)
    }
}
