//! Regex patterns for receipt field extraction.
//!
//! Money captures are always (symbol, amount) in groups 1 and 2.

use lazy_static::lazy_static;
use regex::Regex;

/// Currency symbol and amount with two decimals.
macro_rules! money {
    () => {
        r"([$€£])\s*([0-9][0-9,]*\.\d{2})"
    };
}

/// "July 4, 2024" / "Jul 4, 2024".
macro_rules! month_day_year {
    () => {
        r"([A-Za-z]+\s+\d{1,2},\s+\d{4})"
    };
}

const CARD_BRANDS: &str = r"(?:American Express|Amex|Visa|Mastercard|MasterCard|Discover)";

lazy_static! {
    // Canonical file names start with an ISO date
    pub static ref DATE_PREFIX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}\b").unwrap();

    // Generic paid/invoice dates
    pub static ref DATE_PAID: Regex = Regex::new(
        concat!(r"(?i)\bDate paid\s+", month_day_year!(), r"\b")
    ).unwrap();

    pub static ref PAID_ON_LONG: Regex = Regex::new(
        concat!(r"(?i)\bpaid on\s+", month_day_year!(), r"\b")
    ).unwrap();

    pub static ref PAID_ON_NUMERIC: Regex = Regex::new(
        r"(?i)\bPaid on\s+(\d{1,2}/\d{1,2}/\d{4})\b"
    ).unwrap();

    pub static ref DATE_OF_ISSUE: Regex = Regex::new(
        concat!(r"(?i)\bDate of issue\s+", month_day_year!(), r"\b")
    ).unwrap();

    pub static ref INVOICE_DATE_NUMERIC: Regex = Regex::new(
        r"(?i)\bInvoice date:?\s+(\d{1,2}/\d{1,2}/\d{4})\b"
    ).unwrap();

    pub static ref INVOICE_DATE_LONG: Regex = Regex::new(
        concat!(r"(?i)\bInvoice date:?\s+", month_day_year!(), r"\b")
    ).unwrap();

    // GitHub: "Date 2024-03-01 9:15AM PST"
    pub static ref GITHUB_DATE: Regex = Regex::new(
        r"(?i)\bDate\s+(\d{4}-\d{2}-\d{2})\s+\d{1,2}:\d{2}(?:AM|PM)\s+[A-Z]{2,4}\b"
    ).unwrap();

    pub static ref GITHUB_TOTAL: Regex = Regex::new(
        concat!(r"(?i)\bTotal\s+", money!(), r"\s*USD\*?")
    ).unwrap();

    // Hostgator payments table: header line, then "m/d/yy ... $amount"
    pub static ref HOSTGATOR_PAYMENT: Regex = Regex::new(
        r"(?i)\bPayments:\s*Date[^\n]*\n(?P<date>\d{1,2}/\d{1,2}/\d{2})[^\n]*?(?P<amount>\$[0-9][0-9,]*\.\d{2})\b"
    ).unwrap();

    // Google statements and receipts
    pub static ref GOOGLE_STATEMENT_DATE: Regex = Regex::new(
        r"(?i)\bStatement issue date\s*([A-Za-z]{3}\s+\d{1,2},\s+\d{4})"
    ).unwrap();

    pub static ref GOOGLE_WEEKDAY_DATE: Regex = Regex::new(
        r"(?i)\b(?P<weekday>[A-Za-z]+),\s+(?P<month>[A-Za-z]+)\s+(?P<day>\d{1,2})\s+\d{1,2}:\d{2}\s*(?:AM|PM)\b"
    ).unwrap();

    pub static ref GOOGLE_MONTHLY_CHARGE: Regex = Regex::new(
        r"(?i)\b([A-Za-z]{3}\s+\d{1,2})\s+Monthly charge:"
    ).unwrap();

    pub static ref GOOGLE_SUMMARY_YEAR: Regex = Regex::new(
        r"(?i)Summary for [A-Za-z]{3}\s+\d{1,2},\s+(\d{4})"
    ).unwrap();

    pub static ref GOOGLE_ISSUE_YEAR: Regex = Regex::new(
        r"(?i)Statement issue date.*?(\d{4})"
    ).unwrap();

    pub static ref GOOGLE_TOTAL_CODE: Regex = Regex::new(
        r"(?i)\bTotal\s+([A-Z]{3})\s+([0-9][0-9,]*\.\d{2})\b"
    ).unwrap();

    pub static ref GOOGLE_PAYMENTS_RECEIVED: Regex = Regex::new(
        concat!(r"(?i)\bTotal payments received\s+[-−]?\s*", money!(), r"\b")
    ).unwrap();

    pub static ref GOOGLE_ENDING_BALANCE: Regex = Regex::new(
        concat!(r"(?i)\bEnding balance in USD\s+", money!(), r"\b")
    ).unwrap();

    pub static ref GOOGLE_NEW_ACTIVITY: Regex = Regex::new(
        concat!(r"(?i)\bTotal new activity\s+", money!(), r"\b")
    ).unwrap();

    // Generic amounts
    pub static ref AMOUNT_PAID: Regex = Regex::new(
        concat!(r"(?i)\bAmount paid\s+", money!(), r"\b")
    ).unwrap();

    pub static ref AMOUNT_PAID_ON: Regex = Regex::new(
        concat!(r"(?i)", money!(), r"\s+paid on\b")
    ).unwrap();

    pub static ref AMOUNT_DUE: Regex = Regex::new(
        concat!(r"(?i)\bAmount due:?\s*", money!(), r"\b")
    ).unwrap();

    pub static ref TOTAL: Regex = Regex::new(
        concat!(r"(?i)\bTotal\s+", money!(), r"\b")
    ).unwrap();

    // Card last four
    pub static ref CARD_BRAND_DASH: Regex = Regex::new(
        &format!(r"(?i){}\s*-\s*(\d{{4}})", CARD_BRANDS)
    ).unwrap();

    pub static ref CARD_CHARGED_TO: Regex = Regex::new(
        r"(?i)Charged to [^\n]*\*(\d{4})\)"
    ).unwrap();

    pub static ref CARD_BRAND_MASKED: Regex = Regex::new(
        &format!(r"(?i){}[^\n]{{0,80}}[•* ]{{2,}}(\d{{4}})", CARD_BRANDS)
    ).unwrap();

    pub static ref CARD_CREDIT_CARD: Regex = Regex::new(
        r"(?i)\bCreditCard\s+\*{2,}(\d{4})\b"
    ).unwrap();

    pub static ref CARD_LOOSE: Regex = Regex::new(
        r"(?i)(?:card|payment method|charged to)[^\n]{0,80}(\d{4})"
    ).unwrap();
}
