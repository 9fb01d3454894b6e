//! Data models shared across the pipeline.

pub mod config;
pub mod file;
pub mod receipt;

pub use config::{ContentComparison, RcptConfig, RenameConfig, ScanConfig};
pub use file::FileEntry;
pub use receipt::{format_filename, CardDigits, Money, ReceiptRecord, Vendor};
