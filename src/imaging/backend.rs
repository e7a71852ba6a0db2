//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the pixel-level operations the pipeline
//! needs: decode (with orientation applied), inspect, resample, and encode.
//! Decisions (gating, target size, format choice) live outside the backend so
//! they can be tested against the mock in this module.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) on top of the `image`
//! crate.

use super::params::EncodeParams;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
    #[error("Cannot resize {path} to {target}: target size exceeds memory limit")]
    TooLarge { path: String, target: Dimensions },
}

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// The image type is owned and moved through each step, so a decoded buffer
/// never outlives the pipeline invocation that produced it.
pub trait ImageBackend {
    type Image;

    /// Decode a file and rotate/flip its pixels to the stored orientation.
    /// No metadata survives into the returned image.
    fn decode(&self, path: &Path) -> Result<Self::Image, BackendError>;

    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Whether the decoded color type carries an alpha channel.
    fn has_alpha(&self, image: &Self::Image) -> bool;

    /// Resample to exactly `target`.
    fn resample(&self, image: Self::Image, target: Dimensions) -> Self::Image;

    /// Write `image` as described by `params`. The parent directory must exist.
    fn encode(&self, image: Self::Image, params: &EncodeParams) -> Result<(), BackendError>;
}
