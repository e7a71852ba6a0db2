//! Batch driver: discover, convert one file at a time, count.
//!
//! Files are processed strictly in sequence. A file that fails or is skipped
//! is recorded and the run moves on; only problems with the run itself (an
//! invalid config, a missing source directory, an unreadable source tree)
//! abort it, and they do so before the first file is touched.
//!
//! Progress is reported by sending [`BatchEvent`]s over an optional channel,
//! so the caller decides how (and whether) to display them.

use crate::config::{ConfigError, ConvertConfig};
use crate::imaging::ImageBackend;
use crate::process::{ProcessingOutcome, process_one};
use crate::scan::{ScanError, discover_images, output_path};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Discovery finished; `total` files will be processed.
    Discovered { total: usize },
    /// One file went through the pipeline.
    Processed(ProcessingOutcome),
}

/// Per-status totals for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &ProcessingOutcome) {
        match outcome {
            ProcessingOutcome::Success { .. } => self.processed += 1,
            ProcessingOutcome::Skipped { .. } => self.skipped += 1,
            ProcessingOutcome::Failed { .. } => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.errors
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OK={}, SKIP={}, ERR={}",
            self.processed, self.skipped, self.errors
        )
    }
}

/// Everything a finished run produced, in processing order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub outcomes: Vec<ProcessingOutcome>,
}

/// Convert every supported image under `source_root` into `output_root`.
pub fn run<B: ImageBackend>(
    backend: &B,
    source_root: &Path,
    output_root: &Path,
    config: &ConvertConfig,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchReport, BatchError> {
    config.validate()?;
    let sources = discover_images(source_root)?;

    let send = |event: BatchEvent| {
        if let Some(tx) = &events {
            // A closed receiver only means nobody is listening anymore
            let _ = tx.send(event);
        }
    };
    send(BatchEvent::Discovered {
        total: sources.len(),
    });

    let mut summary = BatchSummary::default();
    let mut outcomes = Vec::with_capacity(sources.len());

    for source in &sources {
        let dest_hint = output_path(source, source_root, output_root);
        let outcome = process_one(backend, source, &dest_hint, config);
        summary.record(&outcome);
        send(BatchEvent::Processed(outcome.clone()));
        outcomes.push(outcome);
    }

    Ok(BatchReport { summary, outcomes })
}

/// Write a report as pretty-printed JSON.
pub fn write_report(report: &BatchReport, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, MockImage, RecordedOp};
    use crate::process::SkipReason;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn summary_counts_each_status() {
        let mut summary = BatchSummary::default();
        summary.record(&ProcessingOutcome::Success {
            source: "a".into(),
            output: "b".into(),
            original: Dimensions::new(2, 2),
            resized: Dimensions::new(1, 1),
        });
        summary.record(&ProcessingOutcome::Skipped {
            source: "c".into(),
            reason: SkipReason::NotHighResolution,
        });
        summary.record(&ProcessingOutcome::Failed {
            source: "d".into(),
            error: "boom".into(),
        });
        summary.record(&ProcessingOutcome::Failed {
            source: "e".into(),
            error: "boom".into(),
        });

        assert_eq!(
            summary,
            BatchSummary {
                processed: 1,
                skipped: 1,
                errors: 2
            }
        );
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.to_string(), "OK=1, SKIP=1, ERR=2");
    }

    #[test]
    fn run_processes_in_path_order_and_mirrors_tree() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("in");
        let output = tmp.path().join("out");
        touch(&source.join("a/one.png"));
        touch(&source.join("b/two.jpg"));

        // Decoded in discovery order: a/one.png, then b/two.jpg
        let backend = MockBackend::with_images(vec![
            MockImage::opaque(3000, 2000),
            MockImage::opaque(100, 100),
        ]);

        let report = run(&backend, &source, &output, &ConvertConfig::default(), None).unwrap();

        assert_eq!(report.summary.processed, 1);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            &report.outcomes[0],
            ProcessingOutcome::Success { output: o, .. } if *o == output.join("a/one.jpg")
        ));

        let decodes: Vec<_> = backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Decode(p) => Some(PathBuf::from(p)),
                _ => None,
            })
            .collect();
        assert_eq!(
            decodes,
            vec![source.join("a/one.png"), source.join("b/two.jpg")]
        );
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("in");
        touch(&source.join("1.jpg"));
        touch(&source.join("2.jpg"));

        // Queue empty: every decode fails
        let backend = MockBackend::new();
        let report = run(
            &backend,
            &source,
            &tmp.path().join("out"),
            &ConvertConfig::default(),
            None,
        )
        .unwrap();

        assert_eq!(
            report.summary,
            BatchSummary {
                processed: 0,
                skipped: 0,
                errors: 2
            }
        );
    }

    #[test]
    fn run_sends_events() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("in");
        touch(&source.join("1.jpg"));

        let backend = MockBackend::with_images(vec![MockImage::opaque(10, 10)]);
        let (tx, rx) = std::sync::mpsc::channel();
        run(
            &backend,
            &source,
            &tmp.path().join("out"),
            &ConvertConfig::default(),
            Some(tx),
        )
        .unwrap();

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], BatchEvent::Discovered { total: 1 }));
        assert!(matches!(
            &events[1],
            BatchEvent::Processed(ProcessingOutcome::Skipped { .. })
        ));
    }

    #[test]
    fn missing_source_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let result = run(
            &backend,
            &tmp.path().join("missing"),
            &tmp.path().join("out"),
            &ConvertConfig::default(),
            None,
        );
        assert!(matches!(
            result,
            Err(BatchError::Scan(ScanError::SourceNotFound(_)))
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn invalid_config_is_fatal_before_any_file() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("in/1.jpg"));
        let backend = MockBackend::new();
        let config = ConvertConfig {
            scale: 0.0,
            ..Default::default()
        };

        let result = run(
            &backend,
            &tmp.path().join("in"),
            &tmp.path().join("out"),
            &config,
            None,
        );
        assert!(matches!(result, Err(BatchError::Config(_))));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn report_is_written_as_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reports/run.json");
        let report = BatchReport {
            summary: BatchSummary {
                processed: 0,
                skipped: 1,
                errors: 0,
            },
            outcomes: vec![ProcessingOutcome::Skipped {
                source: "a.jpg".into(),
                reason: SkipReason::NotHighResolution,
            }],
        };

        write_report(&report, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["summary"]["skipped"], 1);
        assert_eq!(json["outcomes"][0]["reason"], "not_high_resolution");
    }
}
