//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the codec layer's seam. The two operations
//! every backend must support are `identify` (header-only dimension read) and
//! `encode` (decode → optional resize → encode → write).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Pipeline tests use the
//! recording `MockBackend` in this module's `tests` submodule.

use super::params::EncodeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image codec backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, resize if requested, encode and write `params.output`.
    fn encode(&self, params: &EncodeParams) -> Result<(), BackendError>;
}
