//! In-place optimization: recompress JPEG/PNG originals and replace them.
//!
//! Backs the `overwrite-originals` binary. Each qualifying file is encoded to
//! `<path>.opt.tmp` next to the original, then renamed over it. Rename on the
//! same filesystem is atomic, so the original is either fully replaced or
//! left exactly as it was. The temp file is removed if encoding or the rename
//! fails; it only survives if the process dies between the two steps.

use crate::config::OverwriteConfig;
use crate::imaging::{ImageBackend, RustBackend, plan_recompress, recompress};
use crate::results::{
    ConversionResult, ConvertError, ImageFile, OutputKind, OutputSize, SkipReason,
};
use std::path::Path;
use tracing::{debug, warn};

/// Optimize `files` (relative to `root`) in place with the production backend.
pub fn overwrite_originals(
    root: &Path,
    files: &[String],
    settings: &OverwriteConfig,
    on_result: impl FnMut(&ConversionResult),
) -> Vec<ConversionResult> {
    overwrite_originals_with_backend(&RustBackend::new(), root, files, settings, on_result)
}

/// Optimize in place using a specific backend (allows testing with mock).
///
/// Same contract as
/// [`generate_derivatives_with_backend`](crate::derive::generate_derivatives_with_backend):
/// sequential, one result per input file, `on_result` called after each.
pub fn overwrite_originals_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    files: &[String],
    settings: &OverwriteConfig,
    mut on_result: impl FnMut(&ConversionResult),
) -> Vec<ConversionResult> {
    let mut results = Vec::with_capacity(files.len());

    for rel in files {
        let result = match optimize_file(backend, root, rel, settings) {
            Ok(result) => result,
            Err(e) => {
                warn!(file = %rel, error = %e, "in-place optimization failed");
                ConversionResult::failed(rel, &e)
            }
        };
        on_result(&result);
        results.push(result);
    }

    results
}

fn optimize_file(
    backend: &impl ImageBackend,
    root: &Path,
    rel: &str,
    settings: &OverwriteConfig,
) -> Result<ConversionResult, ConvertError> {
    let image = ImageFile::stat(root, rel)?;

    if image.size < settings.min_bytes {
        debug!(file = %rel, size = image.size, "skipping small file");
        return Ok(ConversionResult::skipped(rel, SkipReason::TooSmall));
    }

    let Some(params) = plan_recompress(
        &image.absolute,
        &image.extension,
        &settings.encoder_config(),
    ) else {
        debug!(file = %rel, extension = %image.extension, "unsupported extension");
        return Ok(ConversionResult::skipped(
            rel,
            SkipReason::UnsupportedExtension,
        ));
    };

    let tmp = params.output.clone();
    debug!(file = %rel, tmp = %tmp.display(), "recompressing");

    let replaced = recompress(backend, &params)
        .map_err(ConvertError::from)
        .and_then(|written| {
            let optimized = std::fs::metadata(&written)
                .map_err(ConvertError::io(&written))?
                .len();
            std::fs::rename(&written, &image.absolute).map_err(|source| ConvertError::Replace {
                path: image.absolute.clone(),
                source,
            })?;
            debug!(file = %rel, optimized, "replaced original");
            Ok(optimized)
        });

    match replaced {
        Ok(optimized) => Ok(ConversionResult::converted(
            rel,
            image.size,
            vec![OutputSize {
                kind: OutputKind::Optimized,
                bytes: optimized,
            }],
        )),
        Err(e) => {
            discard_temp(&tmp);
            Err(e)
        }
    }
}

/// Best-effort removal of a leftover temp file.
fn discard_temp(tmp: &Path) {
    match std::fs::remove_file(tmp) {
        Ok(()) => debug!(tmp = %tmp.display(), "removed temp file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(tmp = %tmp.display(), error = %e, "could not remove temp file"),
    }
}
