//! Receipt field extraction module.

mod parser;
pub mod rules;
pub mod vendor;

pub use parser::ReceiptParser;
pub use vendor::{classify_vendor, VendorClassifier};

use crate::error::ParseError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ParseError>;
