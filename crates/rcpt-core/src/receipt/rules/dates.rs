//! Paid-date extraction rules.

use std::borrow::Cow;

use chrono::NaiveDate;
use regex::Regex;

use super::patterns::{
    DATE_OF_ISSUE, DATE_PAID, GITHUB_DATE, GOOGLE_ISSUE_YEAR, GOOGLE_MONTHLY_CHARGE,
    GOOGLE_STATEMENT_DATE, GOOGLE_SUMMARY_YEAR, GOOGLE_WEEKDAY_DATE, HOSTGATOR_PAYMENT,
    INVOICE_DATE_LONG, INVOICE_DATE_NUMERIC, PAID_ON_LONG, PAID_ON_NUMERIC,
};
use super::year::{parse_month, parse_weekday, YearInference};
use super::{ExtractionContext, FieldRule, RuleChain};
use crate::error::ParseError;
use crate::models::Vendor;
use crate::receipt::Result;

/// A labelled date whose first capture group parses with a chrono format.
pub struct LabeledDate {
    name: &'static str,
    pattern: &'static Regex,
    format: &'static str,
    strip_periods: bool,
}

impl LabeledDate {
    pub fn new(name: &'static str, pattern: &'static Regex, format: &'static str) -> Self {
        Self {
            name,
            pattern,
            format,
            strip_periods: false,
        }
    }

    /// Match against the text with all periods removed ("Jun. 5" → "Jun 5").
    pub fn ignoring_periods(mut self) -> Self {
        self.strip_periods = true;
        self
    }
}

impl FieldRule for LabeledDate {
    type Output = NaiveDate;

    fn name(&self) -> &'static str {
        self.name
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<NaiveDate>> {
        let text = if self.strip_periods {
            Cow::Owned(ctx.text.replace('.', ""))
        } else {
            Cow::Borrowed(ctx.text)
        };

        Ok(self
            .pattern
            .captures(&text)
            .and_then(|caps| parse_date(&caps[1], self.format)))
    }
}

/// First row of a "Payments:" table (`m/d/yy ... $amount`).
pub struct PaymentRowDate;

impl FieldRule for PaymentRowDate {
    type Output = NaiveDate;

    fn name(&self) -> &'static str {
        "payments table row"
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<NaiveDate>> {
        Ok(HOSTGATOR_PAYMENT
            .captures(ctx.text)
            .and_then(|caps| parse_date(&caps["date"], "%m/%d/%y")))
    }
}

/// "Saturday, June 7 10:32 AM" with the year inferred from the file's mtime.
pub struct WeekdayDate {
    inference: YearInference,
}

impl WeekdayDate {
    pub fn new(inference: YearInference) -> Self {
        Self { inference }
    }
}

impl FieldRule for WeekdayDate {
    type Output = NaiveDate;

    fn name(&self) -> &'static str {
        "weekday receipt line"
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<NaiveDate>> {
        let found = GOOGLE_WEEKDAY_DATE.captures_iter(ctx.text).find_map(|caps| {
            let weekday = parse_weekday(&caps["weekday"])?;
            let month = parse_month(&caps["month"])?;
            let day: u32 = caps["day"].parse().ok()?;
            Some((weekday, month, day))
        });

        let Some((weekday, month, day)) = found else {
            return Ok(None);
        };

        let anchor = ctx.entry.modified_date();
        self.inference.resolve(month, day, weekday, anchor).map(Some)
    }
}

/// "Jan 12 Monthly charge:" with the year taken from the statement header.
pub struct MonthlyChargeDate;

impl FieldRule for MonthlyChargeDate {
    type Output = NaiveDate;

    fn name(&self) -> &'static str {
        "monthly charge row"
    }

    fn try_extract(&self, ctx: &ExtractionContext<'_>) -> Result<Option<NaiveDate>> {
        let Some(caps) = GOOGLE_MONTHLY_CHARGE.captures(ctx.text) else {
            return Ok(None);
        };

        let year = statement_year(ctx.text)?;
        let with_year = format!("{} {}", &caps[1], year);
        Ok(parse_date(&with_year, "%b %d %Y"))
    }
}

/// Year printed in a statement's summary range or issue date.
pub fn statement_year(text: &str) -> Result<i32> {
    if let Some(caps) = GOOGLE_SUMMARY_YEAR.captures(text) {
        if let Ok(year) = caps[1].parse() {
            return Ok(year);
        }
    }

    let without_periods = text.replace('.', "");
    GOOGLE_ISSUE_YEAR
        .captures(&without_periods)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or(ParseError::MissingStatementYear)
}

/// Parse a captured date with one expected chrono format.
pub fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), format).ok()
}

/// Ordered paid-date rules: vendor layouts first, then paid/invoice labels.
pub fn paid_date_rules(inference: YearInference) -> RuleChain<NaiveDate> {
    RuleChain::new("paid date")
        .vendor_rule(Vendor::Hostgator, PaymentRowDate)
        .vendor_rule(
            Vendor::Google,
            LabeledDate::new("statement issue date", &GOOGLE_STATEMENT_DATE, "%b %d, %Y")
                .ignoring_periods(),
        )
        .vendor_rule(Vendor::Google, WeekdayDate::new(inference))
        .vendor_rule(Vendor::Google, MonthlyChargeDate)
        .vendor_rule(
            Vendor::GitHub,
            LabeledDate::new("dated receipt header", &GITHUB_DATE, "%Y-%m-%d"),
        )
        .rule(LabeledDate::new("date paid", &DATE_PAID, "%B %d, %Y"))
        .rule(LabeledDate::new("paid on", &PAID_ON_LONG, "%B %d, %Y"))
        .rule(LabeledDate::new("paid on (numeric)", &PAID_ON_NUMERIC, "%d/%m/%Y"))
        .rule(LabeledDate::new("date of issue", &DATE_OF_ISSUE, "%B %d, %Y"))
        .rule(LabeledDate::new("invoice date (numeric)", &INVOICE_DATE_NUMERIC, "%d/%m/%Y"))
        .rule(LabeledDate::new("invoice date", &INVOICE_DATE_LONG, "%B %d, %Y"))
}
