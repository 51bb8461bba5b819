//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They take
//! configuration, compute [`EncodeParams`], and call the backend. The `plan_*`
//! variants stop before the backend so parameter generation can be tested on
//! its own.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_width_cap;
use super::params::{EncodeFormat, EncodeParams, PngCompression, Quality};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Suffix appended to an original's path while its replacement is written.
pub const TEMP_SUFFIX: &str = ".opt.tmp";

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Swap the last extension of `path` for `ext` (`hero.large.png` → `hero.large.webp`).
pub fn sibling_with_extension(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(ext)
}

/// Temporary sibling used for in-place replacement (`logo.png` → `logo.png.opt.tmp`).
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Settings for WebP + AVIF derivative generation.
#[derive(Debug, Clone)]
pub struct DerivativeConfig {
    /// Sources wider than this are downscaled to exactly this width.
    pub max_width: u32,
    pub webp_quality: Quality,
    pub webp_smart_subsample: bool,
    pub avif_quality: Quality,
    pub avif_speed: u8,
}

impl Default for DerivativeConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            webp_quality: Quality::new(75),
            webp_smart_subsample: true,
            avif_quality: Quality::new(60),
            avif_speed: 6,
        }
    }
}

/// The two encodes that make up one image's derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativePlan {
    pub webp: EncodeParams,
    pub avif: EncodeParams,
}

/// Plan WebP and AVIF siblings for `source` without executing them.
///
/// Both encodes read the original source; the AVIF is never derived from the WebP.
pub fn plan_derivatives(
    source: &Path,
    original_dims: (u32, u32),
    config: &DerivativeConfig,
) -> DerivativePlan {
    let resize = calculate_width_cap(original_dims, config.max_width);
    let webp = EncodeFormat::WebP {
        quality: config.webp_quality,
        smart_subsample: config.webp_smart_subsample,
    };
    let avif = EncodeFormat::Avif {
        quality: config.avif_quality,
        speed: config.avif_speed,
    };

    DerivativePlan {
        webp: EncodeParams {
            source: source.to_path_buf(),
            output: sibling_with_extension(source, webp.extension()),
            resize,
            format: webp,
        },
        avif: EncodeParams {
            source: source.to_path_buf(),
            output: sibling_with_extension(source, avif.extension()),
            resize,
            format: avif,
        },
    }
}

/// Create WebP then AVIF siblings of `source`. Returns their paths in that order.
pub fn create_derivatives(
    backend: &impl ImageBackend,
    source: &Path,
    original_dims: (u32, u32),
    config: &DerivativeConfig,
) -> Result<(PathBuf, PathBuf)> {
    let plan = plan_derivatives(source, original_dims, config);
    backend.encode(&plan.webp)?;
    backend.encode(&plan.avif)?;
    Ok((plan.webp.output, plan.avif.output))
}

/// Settings for same-format recompression.
#[derive(Debug, Clone)]
pub struct RecompressConfig {
    pub jpeg_quality: Quality,
    pub png_palette: bool,
    pub png_quality: Quality,
    pub png_compression: PngCompression,
}

impl Default for RecompressConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::new(75),
            png_palette: true,
            png_quality: Quality::new(80),
            png_compression: PngCompression::MAX,
        }
    }
}

/// Plan a same-format recompression of `source` into its temp sibling.
///
/// `extension` must already be lower-cased. Returns `None` for anything other
/// than JPEG or PNG.
pub fn plan_recompress(
    source: &Path,
    extension: &str,
    config: &RecompressConfig,
) -> Option<EncodeParams> {
    let format = match extension {
        "jpg" | "jpeg" => EncodeFormat::Jpeg {
            quality: config.jpeg_quality,
        },
        "png" => EncodeFormat::Png {
            palette: config.png_palette,
            quality: config.png_quality,
            compression: config.png_compression,
        },
        _ => return None,
    };

    Some(EncodeParams {
        source: source.to_path_buf(),
        output: temp_path_for(source),
        resize: None,
        format,
    })
}

/// Run a planned recompression and return the temp path it was written to.
///
/// Moving the temp file over the original is left to the caller.
pub fn recompress(backend: &impl ImageBackend, params: &EncodeParams) -> Result<PathBuf> {
    backend.encode(params)?;
    Ok(params.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::new().with_dimensions(
            "test.jpg",
            Dimensions {
                width: 1920,
                height: 1080,
            },
        );

        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn sibling_replaces_only_last_extension() {
        assert_eq!(
            sibling_with_extension(Path::new("public/hero.large.png"), "webp"),
            PathBuf::from("public/hero.large.webp")
        );
        assert_eq!(
            sibling_with_extension(Path::new("shots/A.JPEG"), "avif"),
            PathBuf::from("shots/A.avif")
        );
    }

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(
            temp_path_for(Path::new("public/logo.png")),
            PathBuf::from("public/logo.png.opt.tmp")
        );
    }

    #[test]
    fn plan_derivatives_caps_wide_sources() {
        let plan = plan_derivatives(
            Path::new("/assets/hero.jpg"),
            (2400, 1600),
            &DerivativeConfig::default(),
        );

        assert_eq!(plan.webp.resize, Some((1920, 1280)));
        assert_eq!(plan.avif.resize, Some((1920, 1280)));
        assert_eq!(plan.webp.output, PathBuf::from("/assets/hero.webp"));
        assert_eq!(plan.avif.output, PathBuf::from("/assets/hero.avif"));
    }

    #[test]
    fn plan_derivatives_keeps_narrow_sources() {
        let plan = plan_derivatives(
            Path::new("/assets/card.png"),
            (1200, 800),
            &DerivativeConfig::default(),
        );
        assert_eq!(plan.webp.resize, None);
        assert_eq!(plan.avif.resize, None);
    }

    #[test]
    fn plan_derivatives_uses_configured_formats() {
        let plan = plan_derivatives(
            Path::new("/a.png"),
            (10, 10),
            &DerivativeConfig::default(),
        );
        assert_eq!(
            plan.webp.format,
            EncodeFormat::WebP {
                quality: Quality::new(75),
                smart_subsample: true
            }
        );
        assert_eq!(
            plan.avif.format,
            EncodeFormat::Avif {
                quality: Quality::new(60),
                speed: 6
            }
        );
    }

    #[test]
    fn create_derivatives_encodes_both_from_original() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("hero.jpg");
        let backend = MockBackend::new();

        let (webp, avif) =
            create_derivatives(&backend, &source, (800, 600), &DerivativeConfig::default())
                .unwrap();

        assert!(webp.exists());
        assert!(avif.exists());

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        for op in &ops {
            assert!(matches!(
                op,
                RecordedOp::Encode { source: s, .. } if s.ends_with("hero.jpg")
            ));
        }
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode { output, .. } if output.ends_with(".webp")
        ));
        assert!(matches!(
            &ops[1],
            RecordedOp::Encode { output, .. } if output.ends_with(".avif")
        ));
    }

    #[test]
    fn plan_recompress_jpeg_family() {
        let config = RecompressConfig::default();
        for ext in ["jpg", "jpeg"] {
            let params = plan_recompress(Path::new("/p/photo.x"), ext, &config).unwrap();
            assert_eq!(
                params.format,
                EncodeFormat::Jpeg {
                    quality: Quality::new(75)
                }
            );
            assert_eq!(params.output, PathBuf::from("/p/photo.x.opt.tmp"));
            assert_eq!(params.resize, None);
        }
    }

    #[test]
    fn plan_recompress_png_uses_palette_and_max_compression() {
        let params =
            plan_recompress(Path::new("/p/logo.png"), "png", &RecompressConfig::default())
                .unwrap();
        assert_eq!(
            params.format,
            EncodeFormat::Png {
                palette: true,
                quality: Quality::new(80),
                compression: PngCompression::MAX,
            }
        );
    }

    #[test]
    fn plan_recompress_rejects_other_extensions() {
        let config = RecompressConfig::default();
        assert!(plan_recompress(Path::new("/p/anim.gif"), "gif", &config).is_none());
        assert!(plan_recompress(Path::new("/p/pic.webp"), "webp", &config).is_none());
    }

    #[test]
    fn recompress_writes_temp_sibling() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.jpeg");
        let backend = MockBackend::new();
        let params = plan_recompress(&source, "jpeg", &RecompressConfig::default()).unwrap();

        let written = recompress(&backend, &params).unwrap();

        assert_eq!(written, tmp.path().join("photo.jpeg.opt.tmp"));
        assert!(written.exists());
        assert_eq!(backend.encodes().len(), 1);
    }

    #[test]
    fn recompress_failure_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.png");
        let backend = MockBackend::new().failing_on("broken");
        let params = plan_recompress(&source, "png", &RecompressConfig::default()).unwrap();

        assert!(recompress(&backend, &params).is_err());
        assert!(!tmp.path().join("broken.png.opt.tmp").exists());
    }
}
