//! Receipt data models and the canonical filename format.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Issuers the classifier knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    GitHub,
    OpenAI,
    Anthropic,
    Weaviate,
    Cloudflare,
    Hetzner,
    Google,
    Hostgator,
}

impl Vendor {
    /// Name used inside canonical filenames.
    pub fn label(self) -> &'static str {
        match self {
            Self::GitHub => "Github",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Weaviate => "Weaviate",
            Self::Cloudflare => "Cloudflare",
            Self::Hetzner => "Hetzner",
            Self::Google => "Google",
            Self::Hostgator => "Hostgator",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A charged amount with the currency marker it was printed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    /// Currency symbol (`$`, `€`, `S$`) or code followed by a space (`CHF `).
    pub currency: String,
    /// Non-negative amount.
    pub amount: Decimal,
}

impl Money {
    /// Create a money value. Returns `None` for negative amounts.
    pub fn new(currency: impl Into<String>, amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return None;
        }
        Some(Self {
            currency: currency.into(),
            amount,
        })
    }

    /// Amount rendered with exactly two fractional digits.
    pub fn formatted_amount(&self) -> String {
        format!("{:.2}", self.amount.round_dp(2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency, self.formatted_amount())
    }
}

/// Last four digits of the card that paid the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDigits(String);

impl CardDigits {
    /// Accepts exactly four ASCII digits.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields extracted from one receipt, enough to name the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRecord {
    /// Date the charge was paid (or the invoice date when no paid date exists).
    pub paid_date: NaiveDate,

    /// Issuer of the receipt.
    pub vendor: Vendor,

    /// Amount charged.
    pub money: Money,

    /// Card digits, when the receipt prints them.
    pub card: Option<CardDigits>,
}

impl ReceiptRecord {
    /// Canonical filename: `YYYY-MM-DD Vendor $0.00[ Card-1234].pdf`.
    pub fn filename(&self) -> String {
        format_filename(self)
    }
}

/// Build the canonical filename for a record.
pub fn format_filename(record: &ReceiptRecord) -> String {
    let mut stem = format!(
        "{} {} {}",
        record.paid_date.format("%Y-%m-%d"),
        record.vendor.label(),
        record.money
    );
    if let Some(card) = &record.card {
        stem.push_str(" Card-");
        stem.push_str(card.as_str());
    }
    format!("{}.pdf", stem)
}
