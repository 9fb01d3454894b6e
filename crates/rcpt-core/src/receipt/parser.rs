//! Receipt parser: vendor classification followed by per-field rule chains.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::rules::{
    amount_rules, card_rules, paid_date_rules, ExtractionContext, RuleChain, YearInference,
};
use super::vendor::VendorClassifier;
use super::Result;
use crate::error::ParseError;
use crate::models::{CardDigits, FileEntry, Money, ReceiptRecord, Vendor};

/// Turns receipt text into a [`ReceiptRecord`].
///
/// All patterns are compiled up front; a parser is built once per batch
/// and shared across files.
pub struct ReceiptParser {
    classifier: VendorClassifier,
    dates: RuleChain<NaiveDate>,
    amounts: RuleChain<Money>,
    cards: RuleChain<CardDigits>,
}

impl ReceiptParser {
    /// Create a parser with the built-in vendors and rules.
    pub fn new() -> Self {
        Self::with_classifier(VendorClassifier::new())
    }

    /// Create a parser with a custom vendor classifier.
    pub fn with_classifier(classifier: VendorClassifier) -> Self {
        Self {
            classifier,
            dates: paid_date_rules(YearInference::new()),
            amounts: amount_rules(),
            cards: card_rules(),
        }
    }

    /// Identify the receipt's vendor.
    pub fn classify(&self, text: &str) -> Result<Vendor> {
        self.classifier.classify(text)
    }

    /// Paid date, falling back to the invoice date.
    pub fn extract_paid_date(
        &self,
        text: &str,
        vendor: Vendor,
        entry: &FileEntry,
    ) -> Result<NaiveDate> {
        let ctx = ExtractionContext {
            text,
            vendor,
            entry,
        };
        self.dates
            .first_match(&ctx)?
            .ok_or(ParseError::MissingPaidDate)
    }

    /// Total amount charged.
    pub fn extract_amount(&self, text: &str, vendor: Vendor, entry: &FileEntry) -> Result<Money> {
        let ctx = ExtractionContext {
            text,
            vendor,
            entry,
        };
        self.amounts
            .first_match(&ctx)?
            .ok_or(ParseError::MissingAmount)
    }

    /// Card last four, if printed anywhere.
    pub fn extract_card_digits(
        &self,
        text: &str,
        vendor: Vendor,
        entry: &FileEntry,
    ) -> Option<CardDigits> {
        let ctx = ExtractionContext {
            text,
            vendor,
            entry,
        };
        // Card markers never fail, they only match or not
        self.cards.first_match(&ctx).ok().flatten()
    }

    /// Extract every field needed for the canonical filename.
    pub fn parse(&self, text: &str, entry: &FileEntry) -> Result<ReceiptRecord> {
        debug!(
            "Parsing {} from {} characters of text",
            entry.path.display(),
            text.len()
        );

        let vendor = self.classify(text)?;
        let paid_date = self.extract_paid_date(text, vendor, entry)?;
        let money = self.extract_amount(text, vendor, entry)?;
        let card = self.extract_card_digits(text, vendor, entry);

        info!(
            "Parsed {}: {} {} {}{}",
            entry.name(),
            paid_date,
            vendor,
            money,
            card.as_ref()
                .map(|c| format!(" card {}", c))
                .unwrap_or_default()
        );

        Ok(ReceiptRecord {
            paid_date,
            vendor,
            money,
            card,
        })
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}
