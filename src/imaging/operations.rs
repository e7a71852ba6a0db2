//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They take
//! configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::scaled_dimensions;
use super::params::{EncodeParams, OutputFormat, Quality};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Scale both axes by `scale`, independently rounded.
///
/// When rounding lands on the current size the image is handed back untouched
/// instead of being resampled onto itself.
pub fn resize_proportional<B: ImageBackend>(
    backend: &B,
    image: B::Image,
    scale: f64,
) -> B::Image {
    let current = backend.dimensions(&image);
    let target = Dimensions::from(scaled_dimensions(current.as_tuple(), scale));
    if target == current {
        return image;
    }
    backend.resample(image, target)
}

/// Choose format and final path for an image.
///
/// Opaque images become JPEG, images with an alpha channel become PNG. The
/// hinted directory and stem are kept; the extension always matches the
/// encoded format, so PNG bytes never land in a `.jpg` file.
pub fn plan_output(has_alpha: bool, dest_hint: &Path, quality: Quality) -> EncodeParams {
    let format = if has_alpha {
        OutputFormat::Png
    } else {
        OutputFormat::Jpeg
    };
    EncodeParams {
        output: dest_hint.with_extension(format.extension()),
        format,
        quality,
    }
}

/// Encode `image` next to `dest_hint` in its web format and return the path
/// actually written. Parent directories are created as needed.
pub fn save_web_optimized<B: ImageBackend>(
    backend: &B,
    image: B::Image,
    dest_hint: &Path,
    quality: Quality,
) -> Result<PathBuf> {
    let params = plan_output(backend.has_alpha(&image), dest_hint, quality);
    if let Some(parent) = params.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    backend.encode(image, &params)?;
    Ok(params.output)
}
