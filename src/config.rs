//! Tool configuration module.
//!
//! Both binaries run with built-in defaults. A project can override any of
//! them with an `image-optimizer.toml` at its root (or a file passed with
//! `--config`). User values are merged on top of the stock defaults, so the
//! file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! patterns = [
//!     "src/**/assets/**/*.{png,jpg,jpeg,JPG,PNG,JPEG}",
//!     "screenshots/*.{png,jpg,jpeg}",
//!     "public/*.{png,jpg,jpeg}",
//! ]
//!
//! [derivatives]
//! tiny_png_bytes = 5000       # PNGs smaller than this are skipped as icons
//! max_width = 1920            # Wider sources are downscaled to this width
//! webp_quality = 75
//! webp_smart_subsample = true
//! avif_quality = 60
//! avif_speed = 6              # rav1e speed 1 (slow) - 10 (fast)
//!
//! [overwrite]
//! min_bytes = 1024            # Files smaller than this are left alone
//! jpeg_quality = 75
//! png_palette = true          # Quantise PNGs to a palette
//! png_quality = 80            # Palette quality ceiling
//! png_compression = 9         # 0 (fast) - 9 (smallest)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{DerivativeConfig, PngCompression, Quality, RecompressConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the project root when `--config` is not given.
pub const CONFIG_FILENAME: &str = "image-optimizer.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration shared by both tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Glob patterns, relative to the project root, selecting the images to process.
    pub patterns: Vec<String>,
    /// Derivative generator settings.
    pub derivatives: DerivativesConfig,
    /// In-place optimizer settings.
    pub overwrite: OverwriteConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                "src/**/assets/**/*.{png,jpg,jpeg,JPG,PNG,JPEG}".to_string(),
                "screenshots/*.{png,jpg,jpeg}".to_string(),
                "public/*.{png,jpg,jpeg}".to_string(),
            ],
            derivatives: DerivativesConfig::default(),
            overwrite: OverwriteConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patterns.is_empty() {
            return Err(ConfigError::Validation("patterns must not be empty".into()));
        }
        let qualities = [
            ("derivatives.webp_quality", self.derivatives.webp_quality),
            ("derivatives.avif_quality", self.derivatives.avif_quality),
            ("overwrite.jpeg_quality", self.overwrite.jpeg_quality),
            ("overwrite.png_quality", self.overwrite.png_quality),
        ];
        for (key, value) in qualities {
            if !(1..=100).contains(&value) {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }
        if !(1..=10).contains(&self.derivatives.avif_speed) {
            return Err(ConfigError::Validation(
                "derivatives.avif_speed must be 1-10".into(),
            ));
        }
        if self.derivatives.max_width == 0 {
            return Err(ConfigError::Validation(
                "derivatives.max_width must be non-zero".into(),
            ));
        }
        if self.overwrite.png_compression > 9 {
            return Err(ConfigError::Validation(
                "overwrite.png_compression must be 0-9".into(),
            ));
        }
        Ok(())
    }
}

/// Derivative generator (`optimize-images`) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DerivativesConfig {
    /// PNGs below this many bytes are treated as icons and skipped.
    pub tiny_png_bytes: u64,
    /// Maximum output width in pixels; wider sources are downscaled.
    pub max_width: u32,
    pub webp_quality: u32,
    /// Use sharp RGB→YUV conversion for WebP.
    pub webp_smart_subsample: bool,
    pub avif_quality: u32,
    pub avif_speed: u8,
}

impl Default for DerivativesConfig {
    fn default() -> Self {
        Self {
            tiny_png_bytes: 5000,
            max_width: 1920,
            webp_quality: 75,
            webp_smart_subsample: true,
            avif_quality: 60,
            avif_speed: 6,
        }
    }
}

impl DerivativesConfig {
    /// Encoder settings for [`create_derivatives`](crate::imaging::create_derivatives).
    pub fn encoder_config(&self) -> DerivativeConfig {
        DerivativeConfig {
            max_width: self.max_width,
            webp_quality: Quality::new(self.webp_quality),
            webp_smart_subsample: self.webp_smart_subsample,
            avif_quality: Quality::new(self.avif_quality),
            avif_speed: self.avif_speed,
        }
    }
}

/// In-place optimizer (`overwrite-originals`) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverwriteConfig {
    /// Files below this many bytes are skipped.
    pub min_bytes: u64,
    pub jpeg_quality: u32,
    /// Quantise PNGs to a palette of at most 256 colours.
    pub png_palette: bool,
    /// Palette quality ceiling (only used when `png_palette` is set).
    pub png_quality: u32,
    /// 0 (fastest) to 9 (smallest).
    pub png_compression: u8,
}

impl Default for OverwriteConfig {
    fn default() -> Self {
        Self {
            min_bytes: 1024,
            jpeg_quality: 75,
            png_palette: true,
            png_quality: 80,
            png_compression: 9,
        }
    }
}

impl OverwriteConfig {
    /// Encoder settings for [`plan_recompress`](crate::imaging::plan_recompress).
    pub fn encoder_config(&self) -> RecompressConfig {
        RecompressConfig {
            jpeg_quality: Quality::new(self.jpeg_quality),
            png_palette: self.png_palette,
            png_quality: Quality::new(self.png_quality),
            png_compression: PngCompression::new(self.png_compression),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user
///   `patterns` list replaces the stock list rather than extending it.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `image-optimizer.toml` from the project root, falling back to defaults.
pub fn load_config(root: &Path) -> Result<ToolConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILENAME))
}

/// Load an explicit config file path, falling back to defaults if it is absent.
pub fn load_config_file(path: &Path) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `image-optimizer.toml`.
///
/// Printed by `--print-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Image optimizer configuration
# =============================
#
# Place this file at the project root as `image-optimizer.toml`.
# Every key is optional; omitted keys keep the values shown here.

# Glob patterns (relative to the project root) selecting images to process.
# `**` crosses directories, `*` does not, `{a,b}` picks alternatives.
# Hidden files and directories are never matched.
patterns = [
    "src/**/assets/**/*.{png,jpg,jpeg,JPG,PNG,JPEG}",
    "screenshots/*.{png,jpg,jpeg}",
    "public/*.{png,jpg,jpeg}",
]

# ---------------------------------------------------------------------------
# optimize-images: writes <name>.webp and <name>.avif next to each original.
# ---------------------------------------------------------------------------
[derivatives]
# PNGs smaller than this (bytes) are treated as icons and skipped.
tiny_png_bytes = 5000
# Sources wider than this (pixels) are downscaled, keeping aspect ratio.
max_width = 1920
webp_quality = 75
# Sharp RGB->YUV conversion: crisper edges and colours for a little more time.
webp_smart_subsample = true
avif_quality = 60
# rav1e speed: 1 (slowest, smallest) to 10 (fastest).
avif_speed = 6

# ---------------------------------------------------------------------------
# overwrite-originals: recompresses JPEG/PNG files and replaces them in place.
# ---------------------------------------------------------------------------
[overwrite]
# Files smaller than this (bytes) are left untouched.
min_bytes = 1024
jpeg_quality = 75
# Quantise PNGs to at most 256 colours (lossy).
png_palette = true
# Palette quality ceiling, 1-100.
png_quality = 80
# 0 (fastest) to 9 (smallest output).
png_compression = 9
"##
}
