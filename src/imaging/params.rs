//! Parameter types for image operations.
//!
//! These structs describe *what* to encode, not *how*. They are the interface
//! between the high-level [`operations`](super::operations) module (which
//! decides which files to write) and the [`backend`](super::backend) (which
//! does the pixel work), so tests can swap in a mock backend without touching
//! the pipeline logic.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`PngCompression`] — zlib-style compression level (0–9). Clamped on construction.
//! - [`EncodeFormat`] — Target format plus its format-specific settings.
//! - [`EncodeParams`] — Full specification for one encode: source, output, optional resize, format.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// PNG compression effort on the familiar 0 (fastest) to 9 (smallest) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngCompression(u8);

impl PngCompression {
    pub const MAX: Self = Self(9);

    pub fn new(level: u8) -> Self {
        Self(level.min(9))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Map onto oxipng's 0–6 preset range.
    pub fn oxipng_preset(self) -> u8 {
        (u32::from(self.0) * 6 / 9) as u8
    }
}

/// Target encoding and its settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodeFormat {
    /// Lossy WebP. `smart_subsample` enables sharp RGB→YUV conversion.
    WebP {
        quality: Quality,
        smart_subsample: bool,
    },
    /// AVIF via rav1e. `speed` is rav1e's 1 (slowest) to 10 (fastest).
    Avif { quality: Quality, speed: u8 },
    Jpeg { quality: Quality },
    /// PNG, optionally quantised to a palette of at most 256 colours.
    Png {
        palette: bool,
        quality: Quality,
        compression: PngCompression,
    },
}

impl EncodeFormat {
    /// File extension conventionally used for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            EncodeFormat::WebP { .. } => "webp",
            EncodeFormat::Avif { .. } => "avif",
            EncodeFormat::Jpeg { .. } => "jpg",
            EncodeFormat::Png { .. } => "png",
        }
    }
}

/// Parameters for a single decode → (resize) → encode → write operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Exact output dimensions, or `None` to keep the source size.
    pub resize: Option<(u32, u32)>,
    pub format: EncodeFormat,
}
