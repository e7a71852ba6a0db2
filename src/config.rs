//! Conversion configuration.
//!
//! Handles loading, validating, and merging configuration. Values are layered,
//! each layer overriding the one before it:
//!
//! ```text
//! stock defaults  →  --config FILE  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! scale = 0.5               # Scale factor applied to both axes (> 0)
//! force = false             # Write output even when it would not shrink
//!
//! [threshold]
//! min_width = 1600          # Width that makes an image "high-resolution"
//! min_height = 1200         # Height that makes an image "high-resolution"
//!
//! [encoding]
//! jpeg_quality = 90         # JPEG quality for opaque images (1-100)
//! ```
//!
//! An image is converted when its width **or** its height reaches the
//! threshold. Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything the per-image pipeline needs to decide and encode.
///
/// Passed explicitly into [`crate::process::process_one`]; there is no global
/// configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Factor applied to both axes. Values below 1 shrink.
    pub scale: f64,
    /// Encode even when the result would not be smaller than the source.
    pub force: bool,
    /// Resolution gate.
    pub threshold: ThresholdConfig,
    /// Encoder settings.
    pub encoding: EncodingConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            scale: 0.5,
            force: false,
            threshold: ThresholdConfig::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

impl ConvertConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "scale must be > 0 (got {})",
                self.scale
            )));
        }
        if !(1..=100).contains(&self.encoding.jpeg_quality) {
            return Err(ConfigError::Validation(
                "encoding.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    /// Thresholds as a `(min_width, min_height)` pair.
    pub fn min_dimensions(&self) -> (u32, u32) {
        (self.threshold.min_width, self.threshold.min_height)
    }
}

/// Minimum size for an image to be considered high-resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_width: 1600,
            min_height: 1200,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// JPEG quality for opaque images (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub scale: Option<f64>,
    pub force: bool,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub jpeg_quality: Option<u32>,
}

impl ConfigOverrides {
    /// Sparse TOML table holding only the values that were given.
    ///
    /// `force` is a switch: it can turn force mode on, never off.
    pub fn to_toml(&self) -> toml::Value {
        let mut root = toml::value::Table::new();
        if let Some(scale) = self.scale {
            root.insert("scale".into(), toml::Value::Float(scale));
        }
        if self.force {
            root.insert("force".into(), toml::Value::Boolean(true));
        }

        let mut threshold = toml::value::Table::new();
        if let Some(w) = self.min_width {
            threshold.insert("min_width".into(), toml::Value::Integer(w.into()));
        }
        if let Some(h) = self.min_height {
            threshold.insert("min_height".into(), toml::Value::Integer(h.into()));
        }
        if !threshold.is_empty() {
            root.insert("threshold".into(), toml::Value::Table(threshold));
        }

        if let Some(q) = self.jpeg_quality {
            let mut encoding = toml::value::Table::new();
            encoding.insert("jpeg_quality".into(), toml::Value::Integer(q.into()));
            root.insert("encoding".into(), toml::Value::Table(encoding));
        }

        toml::Value::Table(root)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ConvertConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// The path was asked for explicitly, so a missing file is an error.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge the given overlays onto a base value in order, then deserialize and
/// validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<ConvertConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: ConvertConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Build the effective config: stock defaults, then the optional file, then
/// command-line overrides.
pub fn load_config(
    file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ConvertConfig, ConfigError> {
    let mut overlays = Vec::new();
    if let Some(path) = file {
        overlays.push(load_raw_config(path)?);
    }
    overlays.push(overrides.to_toml());
    resolve_config(stock_defaults_value(), overlays)
}

/// A documented stock `webscale.toml` with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# webscale configuration
#
# Pass with `webscale --config webscale.toml convert <INPUT> <OUTPUT>`.
# Every key is optional; command-line flags override values set here.

# Factor applied to both axes. 0.5 halves width and height. Must be > 0.
scale = 0.5

# Write the output even when the scaled image would not be smaller than
# the source (for example with scale = 1.0).
force = false

# An image is converted only when its width OR its height reaches these
# minimums. Smaller images are skipped.
[threshold]
min_width = 1600
min_height = 1200

[encoding]
# Quality for opaque images, which are written as JPEG (1-100).
# Images with an alpha channel are written as lossless PNG instead.
jpeg_quality = 90
"#
}
