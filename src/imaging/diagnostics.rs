//! Color diagnostics. Not part of the conversion pipeline; exposed through the
//! `colors` subcommand to help decide whether an image would survive palette
//! reduction.

use super::calculations::sample_dimensions;
use image::DynamicImage;
use image::imageops::FilterType;
use std::collections::HashSet;

/// Longest edge of the sample inspected by [`count_unique_colors`].
pub const SAMPLE_EDGE: u32 = 200;

/// Count distinct RGBA colors on a nearest-neighbor sample of at most
/// [`SAMPLE_EDGE`]×[`SAMPLE_EDGE`] pixels.
///
/// Sampling keeps the cost flat for huge photos; the count is therefore a
/// lower bound for anything larger than the sample.
pub fn count_unique_colors(image: &DynamicImage) -> usize {
    let (w, h) = sample_dimensions((image.width(), image.height()), SAMPLE_EDGE);
    let sample = if (w, h) == (image.width(), image.height()) {
        image.to_rgba8()
    } else {
        image.resize_exact(w, h, FilterType::Nearest).to_rgba8()
    };

    sample.pixels().map(|p| p.0).collect::<HashSet<_>>().len()
}
