//! Image processing: pure Rust on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode + orientation** | `image::ImageReader`, `DynamicImage::apply_orientation` |
//! | **Resize** | `resize_exact` with Lanczos3 |
//! | **Encode → JPEG** | `jpeg_encoder::Encoder`, quality 90 by default, optimized Huffman tables |
//! | **Encode → PNG** | `PngEncoder`, best compression, adaptive filter |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for gating and dimension math (unit testable)
//! - **Parameters**: Data structures describing an encode
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend
//! - **Diagnostics**: Sampled color counting, outside the pipeline

pub mod backend;
mod calculations;
pub mod diagnostics;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    MAX_TARGET_BYTES, fits_memory_limit, is_high_resolution, rgba_buffer_bytes, sample_dimensions,
    scaled_dimensions, target_dimensions, would_not_shrink,
};
pub use diagnostics::count_unique_colors;
pub use operations::{plan_output, resize_proportional, save_web_optimized};
pub use params::{EncodeParams, OutputFormat, Quality};
pub use rust_backend::{RustBackend, supported_input_extensions};
