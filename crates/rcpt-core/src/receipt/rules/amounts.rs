//! Charged-amount extraction rules.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{
    AMOUNT_DUE, AMOUNT_PAID, AMOUNT_PAID_ON, GITHUB_TOTAL, GOOGLE_ENDING_BALANCE,
    GOOGLE_NEW_ACTIVITY, GOOGLE_PAYMENTS_RECEIVED, GOOGLE_TOTAL_CODE, HOSTGATOR_PAYMENT, TOTAL,
};
use super::{ExtractionContext, FieldRule, RuleChain};
use crate::models::{Money, Vendor};
use crate::receipt::Result;

/// A labelled amount captured as (symbol, amount).
pub struct LabeledMoney {
    name: &'static str,
    pattern: &'static Regex,
    skip_zero: bool,
}

impl LabeledMoney {
    pub fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self {
            name,
            pattern,
            skip_zero: false,
        }
    }

    /// Treat a zero amount as no match.
    pub fn non_zero(mut self) -> Self {
        self.skip_zero = true;
        self
    }
}

impl FieldRule for LabeledMoney {
    type Output = Money;

    fn name(&self) -> &'static str {
        self.name
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<Money>> {
        let Some(caps) = self.pattern.captures(ctx.text) else {
            return Ok(None);
        };
        let Some(amount) = parse_amount(&caps[2]) else {
            return Ok(None);
        };
        if self.skip_zero && amount.is_zero() {
            return Ok(None);
        }
        Ok(Money::new(&caps[1], amount.abs()))
    }
}

/// Amount column of the first "Payments:" table row.
pub struct PaymentRowAmount;

impl FieldRule for PaymentRowAmount {
    type Output = Money;

    fn name(&self) -> &'static str {
        "payments table row"
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<Money>> {
        Ok(HOSTGATOR_PAYMENT
            .captures(ctx.text)
            .and_then(|caps| parse_amount(caps["amount"].trim_start_matches('$')))
            .and_then(|amount| Money::new("$", amount)))
    }
}

/// "Total USD 19.99": an ISO currency code instead of a symbol.
pub struct CurrencyCodeTotal;

impl FieldRule for CurrencyCodeTotal {
    type Output = Money;

    fn name(&self) -> &'static str {
        "total with currency code"
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<Money>> {
        Ok(GOOGLE_TOTAL_CODE.captures(ctx.text).and_then(|caps| {
            let currency = currency_symbol(&caps[1].to_uppercase());
            parse_amount(&caps[2]).and_then(|amount| Money::new(currency, amount))
        }))
    }
}

/// Symbol for a currency code; unknown codes are kept as `"CODE "`.
pub fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "SGD" => "S$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{} ", other),
    }
}

/// Parse an amount such as `1,234.50`, dropping thousands separators.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

/// Ordered amount rules: vendor layouts first, then generic totals.
pub fn amount_rules() -> RuleChain<Money> {
    RuleChain::new("amount")
        .vendor_rule(Vendor::Hostgator, PaymentRowAmount)
        .vendor_rule(Vendor::Google, CurrencyCodeTotal)
        .vendor_rule(
            Vendor::Google,
            LabeledMoney::new("total payments received", &GOOGLE_PAYMENTS_RECEIVED).non_zero(),
        )
        .vendor_rule(
            Vendor::Google,
            LabeledMoney::new("ending balance", &GOOGLE_ENDING_BALANCE),
        )
        .vendor_rule(
            Vendor::Google,
            LabeledMoney::new("total new activity", &GOOGLE_NEW_ACTIVITY),
        )
        .vendor_rule(Vendor::GitHub, LabeledMoney::new("total in USD", &GITHUB_TOTAL))
        .rule(LabeledMoney::new("amount paid", &AMOUNT_PAID))
        .rule(LabeledMoney::new("paid on", &AMOUNT_PAID_ON))
        .rule(LabeledMoney::new("amount due", &AMOUNT_DUE))
        .rule(LabeledMoney::new("total", &TOTAL))
}
