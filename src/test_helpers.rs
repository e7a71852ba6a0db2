//! Shared test utilities for the webscale test suite.
//!
//! Every fixture is synthesized with the `image` crate into a temp directory,
//! so the repository carries no binary test images.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("a/photo.jpg"), 300, 200);
//! ```

use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a valid opaque JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a valid opaque (RGB, no alpha channel) PNG, whatever the extension.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    gradient(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// Write an RGBA PNG whose alpha ramps along each row (`alpha = x * 8`).
pub fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([200, (y % 256) as u8, 40, ((x * 8) % 256) as u8])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}
