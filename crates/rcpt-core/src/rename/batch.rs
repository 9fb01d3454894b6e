//! Batch driver: per-file isolation and outcome counting.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::decision::{RenameExecutor, RenameOutcome, RunMode};
use crate::error::{RcptError, Result};
use crate::models::file::display_name;
use crate::models::FileEntry;
use crate::pdf::TextSource;
use crate::receipt::ReceiptParser;

/// Outcome of one file, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: RenameOutcome,
    pub mode: RunMode,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = display_name(&self.path);
        match &self.outcome {
            RenameOutcome::Renamed { target } => {
                write!(f, "RENAME {} -> {}", name, display_name(target))
            }
            RenameOutcome::DeletedDuplicate { target } if self.mode == RunMode::DryRun => write!(
                f,
                "DELETE-DUPLICATE {} (would delete; same as {})",
                name,
                display_name(target)
            ),
            RenameOutcome::DeletedDuplicate { target } => write!(
                f,
                "DELETE-DUPLICATE {} (same as {})",
                name,
                display_name(target)
            ),
            RenameOutcome::Unchanged => write!(f, "UNCHANGED {}", name),
            RenameOutcome::SkippedConflict { target } => write!(
                f,
                "WARNING {} -> {} exists and differs; skipped",
                name,
                display_name(target)
            ),
            RenameOutcome::SkippedError(reason) => {
                write!(f, "WARNING {}: {}; skipped", name, reason)
            }
        }
    }
}

/// Number of files per outcome kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub renamed: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub conflicts: usize,
    pub errors: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: &RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed { .. } => self.renamed += 1,
            RenameOutcome::DeletedDuplicate { .. } => self.deleted += 1,
            RenameOutcome::Unchanged => self.unchanged += 1,
            RenameOutcome::SkippedConflict { .. } => self.conflicts += 1,
            RenameOutcome::SkippedError(_) => self.errors += 1,
        }
    }

    /// Total files with an outcome.
    pub fn processed(&self) -> usize {
        self.renamed + self.deleted + self.unchanged + self.conflicts + self.errors
    }
}

/// Everything a batch produced.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub counts: OutcomeCounts,
    /// The run stopped early on request.
    pub interrupted: bool,
}

impl BatchReport {
    pub fn summary_line(&self) -> String {
        let c = &self.counts;
        format!(
            "Summary: processed={} renamed={} deleted={} unchanged={} conflicts={} errors={}",
            c.processed(),
            c.renamed,
            c.deleted,
            c.unchanged,
            c.conflicts,
            c.errors
        )
    }
}

/// Runs classification, extraction, formatting and the rename decision for
/// each file, isolating failures per file.
pub struct BatchRunner<S> {
    source: S,
    parser: ReceiptParser,
    executor: RenameExecutor,
    stop: Option<Arc<AtomicBool>>,
}

impl<S: TextSource> BatchRunner<S> {
    pub fn new(source: S, parser: ReceiptParser, executor: RenameExecutor) -> Self {
        Self {
            source,
            parser,
            executor,
            stop: None,
        }
    }

    /// Stop after the current file once `flag` is set.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Process one file; never fails, errors become `SkippedError`.
    pub fn process_file(&self, path: &Path) -> RenameOutcome {
        match self.try_process(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                let reason = match e {
                    RcptError::Parse(parse) => parse.to_string(),
                    other => format!("unexpected error: {}", other),
                };
                warn!("Skipping {}: {}", path.display(), reason);
                RenameOutcome::SkippedError(reason)
            }
        }
    }

    fn try_process(&self, path: &Path) -> Result<RenameOutcome> {
        let entry = FileEntry::from_path(path)?;
        let text = self.source.raw_text(path)?;
        let record = self.parser.parse(&text, &entry)?;
        let target = path.with_file_name(record.filename());
        Ok(self.executor.execute(&entry, &target)?)
    }

    /// Process `paths` in sorted order.
    pub fn run(&self, paths: &[PathBuf]) -> Result<BatchReport> {
        self.run_with(paths, |_| {})
    }

    /// Process `paths` in sorted order, calling `on_file` as each finishes.
    ///
    /// Fails only when `paths` is empty.
    pub fn run_with<F>(&self, paths: &[PathBuf], mut on_file: F) -> Result<BatchReport>
    where
        F: FnMut(&FileReport),
    {
        if paths.is_empty() {
            return Err(RcptError::NoEligibleFiles);
        }

        let mut sorted = paths.to_vec();
        sorted.sort();

        let mut report = BatchReport::default();
        for path in sorted {
            if self.stop_requested() {
                info!("Stop requested; {} files left unprocessed", paths.len() - report.files.len());
                report.interrupted = true;
                break;
            }

            let outcome = self.process_file(&path);
            report.counts.record(&outcome);

            let file_report = FileReport {
                path,
                outcome,
                mode: self.executor.mode(),
            };
            on_file(&file_report);
            report.files.push(file_report);
        }

        info!("{}", report.summary_line());
        Ok(report)
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
