//! # webscale
//!
//! Batch-downscale a tree of high-resolution photos into web-ready files. The
//! output tree mirrors the input tree; each image is shrunk by a fixed factor
//! and re-encoded as JPEG (opaque) or PNG (has an alpha channel).
//!
//! # Architecture
//!
//! ```text
//! scan      input/  →  sorted list of images + planned output paths
//! process   one file:  decode → gate → size checks → resize → encode  →  outcome
//! batch     run process over every file, count outcomes, emit events
//! ```
//!
//! The per-file pipeline never fails: every problem with a single file becomes
//! a [`process::ProcessingOutcome`] and the batch carries on. Only run-level
//! problems (bad config, missing input directory) are errors.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the input directory, filters by extension, mirrors paths into the output tree |
//! | [`process`] | The per-image pipeline and its typed outcome |
//! | [`batch`] | Runs the pipeline over a whole tree, aggregates a summary, writes JSON reports |
//! | [`config`] | Layered `ConvertConfig` loading (defaults → TOML file → CLI flags) and validation |
//! | [`imaging`] | Pure-Rust image operations: gating math, orientation, resize, JPEG/PNG encoding |
//! | [`output`] | CLI output formatting: one status line per file plus a summary |
//!
//! # Design Decisions
//!
//! ## Either Axis Makes an Image High-Resolution
//!
//! The gate is `width >= min_width || height >= min_height`. Panoramas and
//! tall scans are usually exactly the files that need shrinking, even when
//! their short side is small.
//!
//! ## Format Follows the Alpha Channel
//!
//! Photos without transparency compress far better as JPEG, so opaque images
//! are always written as `.jpg` whatever their source format. Anything with
//! an alpha channel is written as lossless PNG so soft edges survive intact.
//!
//! ## Never Enlarge by Accident
//!
//! If scaling would leave either axis the same size or larger, the file is
//! skipped unless `force` is set. Rerunning with `scale = 1.0` is therefore a
//! no-op by default.
//!
//! ## No Metadata in the Output
//!
//! EXIF orientation is burned into the pixels at decode time, and the
//! encoders only ever see raw pixels. Capture time, GPS position and camera
//! details never reach the published files.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
