//! Derivative generation: WebP + AVIF siblings next to each original.
//!
//! Backs the `optimize-images` binary. For every enumerated file:
//!
//! ```text
//! public/hero.jpg (50 KB, 2400x1600)
//!   ├── public/hero.webp   quality 75, smart subsampling, resized to 1920x1280
//!   └── public/hero.avif   quality 60, resized to 1920x1280
//! ```
//!
//! PNGs under the icon threshold are skipped before the codec is touched.
//! Originals are never modified. A failure on one file is recorded and the
//! batch moves on; the run as a whole never fails because of a single file.

use crate::config::DerivativesConfig;
use crate::imaging::{ImageBackend, RustBackend, create_derivatives, get_dimensions};
use crate::results::{
    ConversionResult, ConvertError, ImageFile, OutputKind, OutputSize, SkipReason,
};
use std::path::Path;
use tracing::{debug, warn};

/// Generate derivatives for `files` (relative to `root`) with the production backend.
pub fn generate_derivatives(
    root: &Path,
    files: &[String],
    settings: &DerivativesConfig,
    on_result: impl FnMut(&ConversionResult),
) -> Vec<ConversionResult> {
    generate_derivatives_with_backend(&RustBackend::new(), root, files, settings, on_result)
}

/// Generate derivatives using a specific backend (allows testing with mock).
///
/// Files are processed strictly in order. `on_result` is called once per file,
/// right after it finishes, with the same record that ends up in the returned
/// list. The returned list always has one entry per input file.
pub fn generate_derivatives_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    files: &[String],
    settings: &DerivativesConfig,
    mut on_result: impl FnMut(&ConversionResult),
) -> Vec<ConversionResult> {
    let mut results = Vec::with_capacity(files.len());

    for rel in files {
        let result = match derive_file(backend, root, rel, settings) {
            Ok(result) => result,
            Err(e) => {
                warn!(file = %rel, error = %e, "derivative generation failed");
                ConversionResult::failed(rel, &e)
            }
        };
        on_result(&result);
        results.push(result);
    }

    results
}

fn derive_file(
    backend: &impl ImageBackend,
    root: &Path,
    rel: &str,
    settings: &DerivativesConfig,
) -> Result<ConversionResult, ConvertError> {
    let image = ImageFile::stat(root, rel)?;

    if image.extension == "png" && image.size < settings.tiny_png_bytes {
        debug!(file = %rel, size = image.size, "skipping tiny png");
        return Ok(ConversionResult::skipped(rel, SkipReason::TinyIcon));
    }

    let (width, height) = get_dimensions(backend, &image.absolute)?;
    debug!(
        file = %rel,
        width,
        height,
        max_width = settings.max_width,
        "encoding derivatives"
    );

    let (webp_path, avif_path) = create_derivatives(
        backend,
        &image.absolute,
        (width, height),
        &settings.encoder_config(),
    )?;

    let webp = std::fs::metadata(&webp_path)
        .map_err(ConvertError::io(&webp_path))?
        .len();
    let avif = std::fs::metadata(&avif_path)
        .map_err(ConvertError::io(&avif_path))?
        .len();

    Ok(ConversionResult::converted(
        rel,
        image.size,
        vec![
            OutputSize {
                kind: OutputKind::WebP,
                bytes: webp,
            },
            OutputSize {
                kind: OutputKind::Avif,
                bytes: avif,
            },
        ],
    ))
}
