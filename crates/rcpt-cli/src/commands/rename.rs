//! The rename command: scan a directory and canonicalize receipt names.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use rcpt_core::models::file::display_name;
use rcpt_core::models::ContentComparison;
use rcpt_core::rename::{
    scan_eligible, BatchReport, BatchRunner, FileReport, RenameExecutor, RenameOutcome, RunMode,
};
use rcpt_core::{PdfTextSource, ReceiptParser};

use super::config;

/// Arguments for renaming a directory of receipts.
#[derive(Args)]
pub struct RenameArgs {
    /// Directory containing receipt PDFs
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Print decisions without renaming or deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Include subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// How an existing target is compared with the source
    #[arg(long, value_enum)]
    compare: Option<CompareMode>,

    /// Write a per-file CSV summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,
}

/// Content comparison for duplicate detection.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompareMode {
    /// Equal byte size
    Size,
    /// Equal size and SHA-256 digest
    Sha256,
}

impl From<CompareMode> for ContentComparison {
    fn from(mode: CompareMode) -> Self {
        match mode {
            CompareMode::Size => ContentComparison::Size,
            CompareMode::Sha256 => ContentComparison::Sha256,
        }
    }
}

pub async fn run(args: RenameArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    if !args.directory.is_dir() {
        anyhow::bail!("Not a directory: {}", args.directory.display());
    }

    let mut config = config::load(config_path)?;
    if args.recursive {
        config.scan.recursive = true;
    }
    if let Some(compare) = args.compare {
        config.rename.comparison = compare.into();
    }

    let files = scan_eligible(&args.directory, &config.scan)?;
    if files.is_empty() {
        anyhow::bail!(
            "No eligible files found in {}",
            args.directory.display()
        );
    }
    info!("Found {} files to process", files.len());

    let mode = if args.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Apply
    };
    let executor = RenameExecutor::new(mode).with_comparison(config.rename.comparison);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; stopping after the current file");
                stop.store(true, Ordering::SeqCst);
            }
        });
    }

    let runner = BatchRunner::new(PdfTextSource, ReceiptParser::new(), executor)
        .with_stop_flag(stop);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let worker_pb = pb.clone();
    let report = tokio::task::spawn_blocking(move || {
        runner.run_with(&files, |file| {
            worker_pb.suspend(|| print_file(file));
            worker_pb.inc(1);
        })
    })
    .await??;

    pb.finish_and_clear();

    if report.interrupted {
        println!(
            "{} Interrupted; remaining files were not processed",
            style("!").yellow()
        );
    }
    if mode == RunMode::DryRun {
        println!("{} Dry run; no files were changed", style("ℹ").blue());
    }
    println!("{}", style(report.summary_line()).bold());

    if let Some(path) = &args.summary {
        write_summary(path, &report)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            path.display()
        );
    }

    Ok(())
}

fn print_file(file: &FileReport) {
    match &file.outcome {
        RenameOutcome::Renamed { .. } => println!("{}", style(file).green()),
        RenameOutcome::DeletedDuplicate { .. } => println!("{}", style(file).cyan()),
        RenameOutcome::Unchanged => println!("{}", style(file).dim()),
        RenameOutcome::SkippedConflict { .. } | RenameOutcome::SkippedError(_) => {
            println!("{}", style(file).yellow())
        }
    }
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "outcome", "target", "reason"])?;

    for file in &report.files {
        let name = display_name(&file.path);
        let (outcome, target, reason) = match &file.outcome {
            RenameOutcome::Renamed { target } => ("renamed", display_name(target), ""),
            RenameOutcome::DeletedDuplicate { target } => {
                ("deleted_duplicate", display_name(target), "")
            }
            RenameOutcome::Unchanged => ("unchanged", String::new(), ""),
            RenameOutcome::SkippedConflict { target } => (
                "conflict",
                display_name(target),
                "target exists and differs",
            ),
            RenameOutcome::SkippedError(reason) => ("error", String::new(), reason.as_str()),
        };
        wtr.write_record([name.as_str(), outcome, target.as_str(), reason])?;
    }

    wtr.flush()?;
    Ok(())
}
