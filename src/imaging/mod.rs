//! Image codec layer: the operations the two tools call per file.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **→ WebP** | libwebp via `webp`, sharp-YUV subsampling |
//! | **→ AVIF** | rav1e via `image::codecs::avif` |
//! | **→ JPEG / PNG** | `image` encoders, `imagequant` + `oxipng` for PNG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and size math (unit testable)
//! - **Parameters**: Data structures describing an encode
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_width_cap, round_kb};
pub use operations::{
    DerivativeConfig, DerivativePlan, RecompressConfig, create_derivatives, get_dimensions,
    plan_derivatives, plan_recompress, recompress, sibling_with_extension, temp_path_for,
};
pub use params::{EncodeFormat, EncodeParams, PngCompression, Quality};
pub use rust_backend::RustBackend;
