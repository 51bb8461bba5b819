//! Per-file data model shared by both tools.
//!
//! Every enumerated file produces exactly one [`ConversionResult`], whether
//! it was converted, skipped, or failed. Results are only held for the final
//! summary and never persisted.

use crate::imaging::BackendError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Anything that can go wrong while converting a single file.
///
/// Never fatal for the batch: the pipelines turn it into [`Outcome::Failed`].
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Imaging(#[from] BackendError),
    #[error("failed to replace {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Adapter for `map_err` that attaches the path being touched.
    pub fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A source image as seen by the pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Path relative to the project root, `/`-separated, as enumerated.
    pub relative: String,
    pub absolute: PathBuf,
    /// Size of the original in bytes.
    pub size: u64,
    /// Lower-cased extension without the dot; empty if there is none.
    pub extension: String,
}

impl ImageFile {
    /// Stat `relative` under `root`.
    pub fn stat(root: &Path, relative: &str) -> Result<Self, ConvertError> {
        let absolute = root.join(relative);
        let size = std::fs::metadata(&absolute)
            .map_err(ConvertError::io(&absolute))?
            .len();
        let extension = absolute
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        Ok(Self {
            relative: relative.to_string(),
            absolute,
            size,
            extension,
        })
    }
}

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// PNG below the derivative generator's icon threshold.
    TinyIcon,
    /// File below the in-place optimizer's minimum size.
    TooSmall,
    /// Not a JPEG or PNG.
    UnsupportedExtension,
}

impl SkipReason {
    /// Short reason text, without the `skipped` prefix.
    pub fn label(self) -> &'static str {
        match self {
            SkipReason::TinyIcon => "tiny icon",
            SkipReason::TooSmall => "too small",
            SkipReason::UnsupportedExtension => "unsupported ext",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped ({})", self.label())
    }
}

/// Which file an [`OutputSize`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    WebP,
    Avif,
    /// The original path after in-place replacement.
    Optimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    pub kind: OutputKind,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted {
        original: u64,
        outputs: Vec<OutputSize>,
    },
    Skipped(SkipReason),
    Failed(String),
}

/// The single record produced for one enumerated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub file: String,
    pub outcome: Outcome,
}

impl ConversionResult {
    pub fn converted(file: &str, original: u64, outputs: Vec<OutputSize>) -> Self {
        Self {
            file: file.to_string(),
            outcome: Outcome::Converted { original, outputs },
        }
    }

    pub fn skipped(file: &str, reason: SkipReason) -> Self {
        Self {
            file: file.to_string(),
            outcome: Outcome::Skipped(reason),
        }
    }

    pub fn failed(file: &str, error: &ConvertError) -> Self {
        Self {
            file: file.to_string(),
            outcome: Outcome::Failed(error.to_string()),
        }
    }

    /// Size of the output of `kind`, if this result produced one.
    pub fn output_size(&self, kind: OutputKind) -> Option<u64> {
        match &self.outcome {
            Outcome::Converted { outputs, .. } => {
                outputs.iter().find(|o| o.kind == kind).map(|o| o.bytes)
            }
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::TinyIcon.to_string(), "skipped (tiny icon)");
        assert_eq!(SkipReason::TooSmall.to_string(), "skipped (too small)");
        assert_eq!(
            SkipReason::UnsupportedExtension.to_string(),
            "skipped (unsupported ext)"
        );
    }

    #[test]
    fn stat_reads_size_and_lowercases_extension() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("public")).unwrap();
        std::fs::write(tmp.path().join("public/Hero.JPEG"), vec![1u8; 1234]).unwrap();

        let file = ImageFile::stat(tmp.path(), "public/Hero.JPEG").unwrap();
        assert_eq!(file.size, 1234);
        assert_eq!(file.extension, "jpeg");
        assert_eq!(file.relative, "public/Hero.JPEG");
    }

    #[test]
    fn stat_missing_file_mentions_path() {
        let tmp = TempDir::new().unwrap();
        let err = ImageFile::stat(tmp.path(), "public/gone.png").unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
        assert!(err.to_string().contains("gone.png"));
    }

    #[test]
    fn imaging_error_message_is_transparent() {
        let err = ConvertError::from(BackendError::ProcessingFailed("bad pixels".into()));
        assert_eq!(err.to_string(), "Processing failed: bad pixels");
    }

    #[test]
    fn output_size_lookup() {
        let result = ConversionResult::converted(
            "a.png",
            9000,
            vec![
                OutputSize {
                    kind: OutputKind::WebP,
                    bytes: 3000,
                },
                OutputSize {
                    kind: OutputKind::Avif,
                    bytes: 2000,
                },
            ],
        );
        assert_eq!(result.output_size(OutputKind::WebP), Some(3000));
        assert_eq!(result.output_size(OutputKind::Avif), Some(2000));
        assert_eq!(result.output_size(OutputKind::Optimized), None);
        assert!(!result.is_failure());
    }
}
