//! Rule-based field extractors for receipts.
//!
//! Each field is extracted by an ordered [`RuleChain`]. Rules answer
//! `Ok(Some(_))` on a match, `Ok(None)` to let the next rule try, and `Err`
//! when the text matched but cannot be completed (the chain stops there).

pub mod amounts;
pub mod cards;
pub mod dates;
pub mod patterns;
pub mod year;

pub use amounts::{amount_rules, parse_amount};
pub use cards::card_rules;
pub use dates::paid_date_rules;
pub use year::{YearInference, DEFAULT_LOOKBACK_YEARS};

use tracing::debug;

use super::Result;
use crate::models::{FileEntry, Vendor};

/// What a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// Sanitized document text.
    pub text: &'a str,
    /// Classified issuer.
    pub vendor: Vendor,
    /// File the text came from.
    pub entry: &'a FileEntry,
}

/// One strategy for extracting a field.
pub trait FieldRule: Send + Sync {
    /// The type of value this rule produces.
    type Output;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Try to extract the field.
    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<Self::Output>>;
}

/// Restricts a rule to receipts from one vendor.
pub struct ForVendor<R> {
    vendor: Vendor,
    rule: R,
}

impl<R> ForVendor<R> {
    pub fn new(vendor: Vendor, rule: R) -> Self {
        Self { vendor, rule }
    }
}

impl<R: FieldRule> FieldRule for ForVendor<R> {
    type Output = R::Output;

    fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<Self::Output>> {
        if ctx.vendor != self.vendor {
            return Ok(None);
        }
        self.rule.try_extract(ctx)
    }
}

/// Ordered rules for one field; the first match wins.
pub struct RuleChain<T> {
    field: &'static str,
    rules: Vec<Box<dyn FieldRule<Output = T>>>,
}

impl<T: 'static> RuleChain<T> {
    /// Create an empty chain for the named field.
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    /// Append a rule tried for every vendor.
    pub fn rule(mut self, rule: impl FieldRule<Output = T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a rule tried only for `vendor`.
    pub fn vendor_rule(self, vendor: Vendor, rule: impl FieldRule<Output = T> + 'static) -> Self {
        self.rule(ForVendor::new(vendor, rule))
    }

    /// Run the rules in order and return the first match.
    pub fn first_match(&self, ctx: &ExtractionContext<'_>) -> Result<Option<T>> {
        for rule in &self.rules {
            if let Some(value) = rule.try_extract(ctx)? {
                debug!("{}: matched rule '{}'", self.field, rule.name());
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
