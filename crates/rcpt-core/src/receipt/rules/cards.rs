//! Card last-four extraction.

use regex::Regex;

use super::patterns::{
    CARD_BRAND_DASH, CARD_BRAND_MASKED, CARD_CHARGED_TO, CARD_CREDIT_CARD, CARD_LOOSE,
};
use super::{ExtractionContext, FieldRule, RuleChain};
use crate::models::CardDigits;
use crate::receipt::Result;

/// A card marker whose first capture group holds four digits.
pub struct CardMarker {
    name: &'static str,
    pattern: &'static Regex,
}

impl CardMarker {
    pub fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self { name, pattern }
    }
}

impl FieldRule for CardMarker {
    type Output = CardDigits;

    fn name(&self) -> &'static str {
        self.name
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<CardDigits>> {
        Ok(self
            .pattern
            .captures(ctx.text)
            .and_then(|caps| CardDigits::parse(&caps[1])))
    }
}

/// Ordered card markers, most specific first.
pub fn card_rules() -> RuleChain<CardDigits> {
    RuleChain::new("card")
        .rule(CardMarker::new("brand - digits", &CARD_BRAND_DASH))
        .rule(CardMarker::new("charged to", &CARD_CHARGED_TO))
        .rule(CardMarker::new("masked brand", &CARD_BRAND_MASKED))
        .rule(CardMarker::new("credit card mask", &CARD_CREDIT_CARD))
        .rule(CardMarker::new("card mention", &CARD_LOOSE))
}
