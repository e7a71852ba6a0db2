//! Pure Rust image processing backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, BMP, WebP) | `image::ImageReader` (format sniffed from content) |
//! | Orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resample | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `jpeg_encoder::Encoder` (quality from params, optimized Huffman tables) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (`CompressionType::Best`, adaptive filter) |
//!
//! Metadata is never written back: the encoders receive raw pixel buffers only,
//! so EXIF (including the orientation tag), GPS and ICC data are dropped.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{EncodeParams, OutputFormat};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use jpeg_encoder::{ColorType as JpegColor, Encoder as JpegEncoder};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions the batch driver picks up, paired with the decoder they need.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("bmp", ImageFormat::Bmp),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Production backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, reason: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn encode_error(path: &Path, reason: impl std::fmt::Display) -> BackendError {
    BackendError::Encode {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Load and decode an image from disk, with its stored orientation applied.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = ImageReader::open(path)
        .map_err(|e| decode_error(path, e))?
        .with_guessed_format()
        .map_err(|e| decode_error(path, e))?
        .into_decoder()
        .map_err(|e| decode_error(path, e))?;

    // A broken EXIF block is not worth failing the file over
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
    Ok(normalize_orientation(image, orientation))
}

/// Physically rotate/flip pixels so the image displays upright without a tag.
pub fn normalize_orientation(mut image: DynamicImage, orientation: Orientation) -> DynamicImage {
    image.apply_orientation(orientation);
    image
}

/// Collapse any color type to 8-bit RGB, or 8-bit RGBA when an alpha channel exists.
pub fn normalize_color(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn create_output(params: &EncodeParams) -> Result<BufWriter<std::fs::File>, BackendError> {
    let file = std::fs::File::create(&params.output).map_err(|e| encode_error(&params.output, e))?;
    Ok(BufWriter::new(file))
}

fn save_jpeg(image: &DynamicImage, params: &EncodeParams) -> Result<(), BackendError> {
    // JPEG has no alpha; drop any channel left over from conversion
    let rgb = image.to_rgb8();
    let (width, height) = match (u16::try_from(rgb.width()), u16::try_from(rgb.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(encode_error(
                &params.output,
                format!("{}x{} exceeds the JPEG size limit", rgb.width(), rgb.height()),
            ));
        }
    };

    let mut writer = create_output(params)?;
    let mut encoder = JpegEncoder::new(&mut writer, params.quality.value() as u8);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(rgb.as_raw(), width, height, JpegColor::Rgb)
        .map_err(|e| encode_error(&params.output, e))?;
    writer.flush().map_err(|e| encode_error(&params.output, e))
}

fn save_png(image: &DynamicImage, params: &EncodeParams) -> Result<(), BackendError> {
    let mut writer = create_output(params)?;
    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Best, PngFilter::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| encode_error(&params.output, e))?;
    writer.flush().map_err(|e| encode_error(&params.output, e))
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        load_image(path)
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions::new(image.width(), image.height())
    }

    fn has_alpha(&self, image: &DynamicImage) -> bool {
        image.color().has_alpha()
    }

    fn resample(&self, image: DynamicImage, target: Dimensions) -> DynamicImage {
        image.resize_exact(target.width, target.height, FilterType::Lanczos3)
    }

    fn encode(&self, image: DynamicImage, params: &EncodeParams) -> Result<(), BackendError> {
        let image = normalize_color(image);
        match params.format {
            OutputFormat::Jpeg => save_jpeg(&image, params),
            OutputFormat::Png => save_png(&image, params),
        }
    }
}
