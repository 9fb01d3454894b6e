//! PDF text extraction.

mod extractor;

pub use extractor::{sanitize_text, PdfExtractor, PdfTextSource};

use std::path::Path;

/// Something that turns a document on disk into linear text.
pub trait TextSource {
    /// Extract the document's text with control characters removed.
    fn raw_text(&self, path: &Path) -> crate::Result<String>;
}
