//! Year inference for dates printed as "Weekday, Month Day".

use chrono::{Datelike, Month, NaiveDate, Weekday};
use tracing::trace;

use crate::error::ParseError;

/// Number of candidate years searched, anchor year included.
pub const DEFAULT_LOOKBACK_YEARS: u32 = 15;

/// Places a year-less (month, day, weekday) on the calendar.
///
/// Candidates run from the anchor's year backwards. The first year where the
/// date exists, falls on the printed weekday, and is not after the anchor
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearInference {
    lookback_years: u32,
}

impl YearInference {
    pub fn new() -> Self {
        Self {
            lookback_years: DEFAULT_LOOKBACK_YEARS,
        }
    }

    /// Set how many years (anchor year included) are searched.
    pub fn with_lookback_years(mut self, years: u32) -> Self {
        self.lookback_years = years;
        self
    }

    /// Resolve the full date.
    pub fn resolve(
        &self,
        month: u32,
        day: u32,
        weekday: Weekday,
        anchor: NaiveDate,
    ) -> Result<NaiveDate, ParseError> {
        let newest = anchor.year();
        let oldest = newest - self.lookback_years as i32 + 1;

        for year in (oldest..=newest).rev() {
            // Feb 29 on common years, or a bogus day
            let Some(candidate) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            if candidate.weekday() == weekday && candidate <= anchor {
                trace!("Inferred year {} for {}-{} ({})", year, month, day, weekday);
                return Ok(candidate);
            }
        }

        Err(ParseError::UnresolvableYear)
    }
}

impl Default for YearInference {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a weekday name, full or abbreviated, in any case.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    name.trim().parse().ok()
}

/// Parse a month name, full or abbreviated, in any case, to 1..=12.
pub fn parse_month(name: &str) -> Option<u32> {
    name.trim().parse::<Month>().ok().map(|m| m.number_from_month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_most_recent_matching_year() {
        // June 7 2025 is a Saturday but after the anchor; 2014 is the previous one
        let inference = YearInference::new();
        let resolved = inference
            .resolve(6, 7, Weekday::Sat, date(2025, 3, 1))
            .unwrap();
        assert_eq!(resolved, date(2014, 6, 7));
    }

    #[test]
    fn test_anchor_day_itself_counts() {
        let inference = YearInference::new();
        let resolved = inference
            .resolve(3, 1, Weekday::Sat, date(2025, 3, 1))
            .unwrap();
        assert_eq!(resolved, date(2025, 3, 1));
    }

    #[test]
    fn test_leap_day_skips_common_years() {
        // Feb 29 2024 was a Thursday
        let inference = YearInference::new();
        let resolved = inference
            .resolve(2, 29, Weekday::Thu, date(2025, 6, 1))
            .unwrap();
        assert_eq!(resolved, date(2024, 2, 29));
    }

    #[test]
    fn test_window_is_bounded() {
        // June 7 was a Saturday in 2014; a window of 11 years from 2025 stops at 2015
        let inference = YearInference::new().with_lookback_years(11);
        assert_eq!(
            inference.resolve(6, 7, Weekday::Sat, date(2025, 3, 1)),
            Err(ParseError::UnresolvableYear)
        );

        let inference = YearInference::new().with_lookback_years(12);
        assert_eq!(
            inference.resolve(6, 7, Weekday::Sat, date(2025, 3, 1)),
            Ok(date(2014, 6, 7))
        );
    }

    #[test]
    fn test_invalid_date_is_unresolvable() {
        let inference = YearInference::new();
        assert_eq!(
            inference.resolve(2, 30, Weekday::Mon, date(2025, 3, 1)),
            Err(ParseError::UnresolvableYear)
        );
    }

    #[test]
    fn test_deterministic() {
        let inference = YearInference::new();
        let first = inference.resolve(12, 25, Weekday::Wed, date(2026, 1, 10));
        for _ in 0..5 {
            assert_eq!(inference.resolve(12, 25, Weekday::Wed, date(2026, 1, 10)), first);
        }
        assert_eq!(first, Ok(date(2024, 12, 25)));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_weekday("Saturday"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("sat"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("Receipt"), None);
        assert_eq!(parse_month("June"), Some(6));
        assert_eq!(parse_month("jun"), Some(6));
        assert_eq!(parse_month("Total"), None);
    }
}
