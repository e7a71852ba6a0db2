//! The per-image pipeline.
//!
//! One source file goes through a fixed sequence, with an early exit at each
//! gate:
//!
//! ```text
//! decode (+ orientation) → resolution gate → target size → shrink check → resize → encode
//!       │                        │                │              │                  │
//!     Failed                  Skipped          Skipped        Skipped       Failed / Success
//! ```
//!
//! [`process_one`] never returns an error. Everything that can go wrong with a
//! single file is folded into a [`ProcessingOutcome`] so the batch keeps going.
//! The decoded buffer is moved through each step and dropped before the
//! function returns, whichever way it exits.

use crate::config::ConvertConfig;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, Quality, fits_memory_limit, is_high_resolution,
    resize_proportional, save_web_optimized, scaled_dimensions, target_dimensions,
    would_not_shrink,
};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Neither axis reaches its threshold.
    NotHighResolution,
    /// The scale factor rounds an axis down to zero pixels.
    BelowOnePixel,
    /// At least one axis would stay the same or grow, and force is off.
    WouldNotShrink,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NotHighResolution => "not high-resolution",
            SkipReason::BelowOnePixel => "target size below one pixel",
            SkipReason::WouldNotShrink => "would not shrink; use --force to override",
        };
        f.write_str(text)
    }
}

/// Result of running one file through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingOutcome {
    Success {
        source: PathBuf,
        /// Path actually written; its extension follows the encoded format.
        output: PathBuf,
        original: Dimensions,
        resized: Dimensions,
    },
    Skipped {
        source: PathBuf,
        reason: SkipReason,
    },
    Failed {
        source: PathBuf,
        error: String,
    },
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success { .. })
    }
}

/// Internal short-circuit for the pipeline body.
enum Stop {
    Skip(SkipReason),
    Fail(BackendError),
}

impl From<BackendError> for Stop {
    fn from(err: BackendError) -> Self {
        Stop::Fail(err)
    }
}

/// Run one file through decode, gating, resize and encode.
///
/// `dest_hint` is where the batch driver would like the output; the extension
/// is replaced to match the encoded format (`.jpg` for opaque, `.png` for
/// images with alpha).
pub fn process_one<B: ImageBackend>(
    backend: &B,
    source: &Path,
    dest_hint: &Path,
    config: &ConvertConfig,
) -> ProcessingOutcome {
    match run_pipeline(backend, source, dest_hint, config) {
        Ok((output, original, resized)) => ProcessingOutcome::Success {
            source: source.to_path_buf(),
            output,
            original,
            resized,
        },
        Err(Stop::Skip(reason)) => ProcessingOutcome::Skipped {
            source: source.to_path_buf(),
            reason,
        },
        Err(Stop::Fail(err)) => ProcessingOutcome::Failed {
            source: source.to_path_buf(),
            error: err.to_string(),
        },
    }
}

fn run_pipeline<B: ImageBackend>(
    backend: &B,
    source: &Path,
    dest_hint: &Path,
    config: &ConvertConfig,
) -> Result<(PathBuf, Dimensions, Dimensions), Stop> {
    let image = backend.decode(source)?;
    let original = backend.dimensions(&image);
    let dims = original.as_tuple();

    if !is_high_resolution(dims, config.min_dimensions()) {
        return Err(Stop::Skip(SkipReason::NotHighResolution));
    }

    let target = target_dimensions(dims, config.scale);
    if target.0 < 1 || target.1 < 1 {
        return Err(Stop::Skip(SkipReason::BelowOnePixel));
    }

    if !config.force && would_not_shrink(dims, target) {
        return Err(Stop::Skip(SkipReason::WouldNotShrink));
    }

    // A forced enlargement can ask for more memory than the resampler may allocate
    let planned = scaled_dimensions(dims, config.scale);
    if !fits_memory_limit(planned) {
        return Err(Stop::Fail(BackendError::TooLarge {
            path: source.display().to_string(),
            target: planned.into(),
        }));
    }

    let resized = resize_proportional(backend, image, config.scale);
    let final_dims = backend.dimensions(&resized);
    let quality = Quality::new(config.encoding.jpeg_quality);
    let output = save_web_optimized(backend, resized, dest_hint, quality)?;

    Ok((output, original, final_dims))
}
