//! Core library for renaming vendor receipt PDFs.
//!
//! This crate provides:
//! - PDF text extraction
//! - Vendor classification and per-vendor field rules (paid date, amount, card)
//! - Canonical `YYYY-MM-DD Vendor $amount[ Card-NNNN].pdf` filenames
//! - Dedup-safe renaming with dry-run support

pub mod error;
pub mod models;
pub mod pdf;
pub mod receipt;
pub mod rename;

pub use error::{ParseError, PdfError, RcptError, Result};
pub use models::{
    format_filename, CardDigits, ContentComparison, FileEntry, Money, RcptConfig, ReceiptRecord,
    Vendor,
};
pub use pdf::{PdfExtractor, PdfTextSource, TextSource};
pub use receipt::{classify_vendor, ReceiptParser, VendorClassifier};
pub use rename::{
    scan_eligible, BatchReport, BatchRunner, FileReport, OutcomeCounts, RenameExecutor,
    RenameOutcome, RunMode,
};
