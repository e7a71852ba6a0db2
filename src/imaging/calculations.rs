//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! Rounding is round-half-to-even throughout, so `1601 × 0.5` lands on `800`,
//! not `801`. Existing output trees were produced with that rule and a rerun
//! must produce the same dimensions.

/// Whether an image counts as high-resolution.
///
/// Either axis reaching its threshold is enough: a wide panorama that is only
/// 900px tall still qualifies against a 1600px width threshold.
///
/// # Examples
/// ```
/// # use webscale::imaging::is_high_resolution;
/// assert!(is_high_resolution((1600, 900), (1600, 1200)));
/// assert!(!is_high_resolution((1200, 800), (1600, 1200)));
/// ```
pub fn is_high_resolution(dims: (u32, u32), min: (u32, u32)) -> bool {
    let (w, h) = dims;
    let (min_w, min_h) = min;
    w >= min_w || h >= min_h
}

/// Round one scaled axis, without clamping.
fn scale_axis(value: u32, scale: f64) -> u32 {
    // `as` saturates: NaN → 0, huge → u32::MAX
    (value as f64 * scale).round_ties_even() as u32
}

/// Target dimensions before clamping to one pixel.
///
/// The pipeline uses this to detect degenerate targets: either axis at `0`
/// means the scale factor is too small for this image.
pub fn target_dimensions(dims: (u32, u32), scale: f64) -> (u32, u32) {
    (scale_axis(dims.0, scale), scale_axis(dims.1, scale))
}

/// Proportionally scaled dimensions, each axis rounded independently and
/// clamped to at least one pixel.
///
/// # Examples
/// ```
/// # use webscale::imaging::scaled_dimensions;
/// assert_eq!(scaled_dimensions((3000, 2000), 0.5), (1500, 1000));
/// assert_eq!(scaled_dimensions((3, 1), 0.1), (1, 1));
/// ```
pub fn scaled_dimensions(dims: (u32, u32), scale: f64) -> (u32, u32) {
    let (w, h) = target_dimensions(dims, scale);
    (w.max(1), h.max(1))
}

/// Whether scaling would fail to shrink the image on at least one axis.
pub fn would_not_shrink(original: (u32, u32), target: (u32, u32)) -> bool {
    target.0 >= original.0 || target.1 >= original.1
}

/// Largest RGBA buffer a resample may allocate, in bytes.
///
/// Same ceiling `image` applies to decoding by default (512 MiB), so anything
/// that decodes can always be written at the same size or smaller.
pub const MAX_TARGET_BYTES: u64 = 512 * 1024 * 1024;

/// Bytes an 8-bit RGBA buffer of `dims` would occupy.
pub fn rgba_buffer_bytes(dims: (u32, u32)) -> u64 {
    (dims.0 as u64 * dims.1 as u64).saturating_mul(4)
}

/// Whether a buffer of `dims` stays within [`MAX_TARGET_BYTES`].
///
/// # Examples
/// ```
/// # use webscale::imaging::fits_memory_limit;
/// assert!(fits_memory_limit((8000, 6000)));
/// assert!(!fits_memory_limit((20_000_000, 1)));
/// ```
pub fn fits_memory_limit(dims: (u32, u32)) -> bool {
    rgba_buffer_bytes(dims) <= MAX_TARGET_BYTES
}

/// Dimensions of the sample used for color diagnostics.
///
/// Images larger than `max_edge` on either axis are shrunk so both axes fit,
/// truncating toward zero. Never returns a zero axis.
pub fn sample_dimensions(dims: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (w, h) = dims;
    if w <= max_edge && h <= max_edge {
        return (w, h);
    }
    let factor = f64::min(max_edge as f64 / w as f64, max_edge as f64 / h as f64);
    let sw = (w as f64 * factor) as u32;
    let sh = (h as f64 * factor) as u32;
    (sw.max(1), sh.max(1))
}
