//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Receipt field extraction error.
    #[error("unparseable receipt: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file discovery pattern.
    #[error("invalid scan pattern: {0}")]
    Pattern(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The scanned directory held nothing to process.
    #[error("no eligible files found")]
    NoEligibleFiles,
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Reasons a receipt could not be turned into a canonical name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No vendor marker group matched.
    #[error("unknown vendor format")]
    UnknownVendor,

    /// Neither a paid date nor an invoice date was found.
    #[error("missing paid date and invoice date")]
    MissingPaidDate,

    /// No total amount was found.
    #[error("missing total amount")]
    MissingAmount,

    /// A year-less date could not be placed in any candidate year.
    #[error("missing inferable year for date without year")]
    UnresolvableYear,

    /// A statement row omits the year and the statement header has none either.
    #[error("missing year for statement payment date")]
    MissingStatementYear,
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
