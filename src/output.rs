//! CLI output formatting.
//!
//! One line per file, led by a fixed-width status tag so a long run can be
//! scanned (or grepped) by status:
//!
//! ```text
//! OK   photos/beach.jpg -> web/beach.jpg (4000x3000 -> 2000x1500)
//! SKIP (not high-resolution): photos/icon.png
//! ERR  photos/broken.jpg: Failed to decode photos/broken.jpg: ...
//! Done. OK=1, SKIP=1, ERR=1
//! ```
//!
//! Each `format_*` function is pure and returns the lines; the `print_*`
//! wrappers write them to stdout.

use crate::batch::{BatchEvent, BatchSummary};
use crate::process::ProcessingOutcome;
use std::path::Path;

/// Format the status line for one processed file.
pub fn format_outcome(outcome: &ProcessingOutcome) -> String {
    match outcome {
        ProcessingOutcome::Success {
            source,
            output,
            original,
            resized,
        } => format!(
            "OK   {} -> {} ({} -> {})",
            source.display(),
            output.display(),
            original,
            resized
        ),
        ProcessingOutcome::Skipped { source, reason } => {
            format!("SKIP ({}): {}", reason, source.display())
        }
        ProcessingOutcome::Failed { source, error } => {
            format!("ERR  {}: {}", source.display(), error)
        }
    }
}

/// Format a progress event. Only per-file lines are shown unless `verbose`.
pub fn format_batch_event(event: &BatchEvent, verbose: bool) -> Vec<String> {
    match event {
        BatchEvent::Discovered { total } if verbose => {
            vec![format!("Found {} image(s)", total)]
        }
        BatchEvent::Processed(outcome) if verbose => vec![format_outcome(outcome)],
        _ => Vec::new(),
    }
}

/// Format the closing summary line.
pub fn format_summary(summary: &BatchSummary) -> String {
    format!("Done. {}", summary)
}

/// Format the result of a color count for one file.
pub fn format_color_count(path: &Path, result: Result<usize, String>) -> String {
    match result {
        Ok(count) => format!("{}: {} unique colors (sampled)", path.display(), count),
        Err(error) => format!("ERR  {}: {}", path.display(), error),
    }
}

pub fn print_summary(summary: &BatchSummary) {
    println!("{}", format_summary(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::process::SkipReason;
    use std::path::PathBuf;

    #[test]
    fn format_success_line() {
        let outcome = ProcessingOutcome::Success {
            source: PathBuf::from("photos/beach.jpg"),
            output: PathBuf::from("web/beach.jpg"),
            original: Dimensions::new(3000, 2000),
            resized: Dimensions::new(1500, 1000),
        };
        assert_eq!(
            format_outcome(&outcome),
            "OK   photos/beach.jpg -> web/beach.jpg (3000x2000 -> 1500x1000)"
        );
    }

    #[test]
    fn format_skip_line() {
        let outcome = ProcessingOutcome::Skipped {
            source: PathBuf::from("photos/icon.png"),
            reason: SkipReason::NotHighResolution,
        };
        assert_eq!(
            format_outcome(&outcome),
            "SKIP (not high-resolution): photos/icon.png"
        );
    }

    #[test]
    fn format_would_not_shrink_mentions_force() {
        let outcome = ProcessingOutcome::Skipped {
            source: PathBuf::from("a.jpg"),
            reason: SkipReason::WouldNotShrink,
        };
        assert!(format_outcome(&outcome).contains("--force"));
    }

    #[test]
    fn format_error_line() {
        let outcome = ProcessingOutcome::Failed {
            source: PathBuf::from("photos/broken.jpg"),
            error: "Failed to decode photos/broken.jpg: bad marker".to_string(),
        };
        assert_eq!(
            format_outcome(&outcome),
            "ERR  photos/broken.jpg: Failed to decode photos/broken.jpg: bad marker"
        );
    }

    #[test]
    fn events_silent_unless_verbose() {
        let event = BatchEvent::Processed(ProcessingOutcome::Skipped {
            source: PathBuf::from("a.jpg"),
            reason: SkipReason::BelowOnePixel,
        });
        assert!(format_batch_event(&event, false).is_empty());
        assert_eq!(
            format_batch_event(&event, true),
            vec!["SKIP (target size below one pixel): a.jpg"]
        );
    }

    #[test]
    fn discovered_event_verbose() {
        let event = BatchEvent::Discovered { total: 12 };
        assert_eq!(format_batch_event(&event, true), vec!["Found 12 image(s)"]);
        assert!(format_batch_event(&event, false).is_empty());
    }

    #[test]
    fn format_summary_line() {
        let summary = BatchSummary {
            processed: 3,
            skipped: 2,
            errors: 1,
        };
        assert_eq!(format_summary(&summary), "Done. OK=3, SKIP=2, ERR=1");
    }

    #[test]
    fn format_color_count_lines() {
        assert_eq!(
            format_color_count(Path::new("a.png"), Ok(42)),
            "a.png: 42 unique colors (sampled)"
        );
        assert_eq!(
            format_color_count(Path::new("b.png"), Err("bad".to_string())),
            "ERR  b.png: bad"
        );
    }
}
