// src/schedule.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::calendar;

/// How often the Azubi has to hand in a Nachweis.
///
/// `Other` is a first-class "no usable schedule" variant: the coverage
/// engine answers "no result" for it instead of computing periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportingInterval {
    Daily,
    Weekly,
    Monthly,
    Other,
}

impl ReportingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportingInterval::Daily => "daily",
            ReportingInterval::Weekly => "weekly",
            ReportingInterval::Monthly => "monthly",
            ReportingInterval::Other => "other",
        }
    }
}

impl fmt::Display for ReportingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown reporting interval '{0}' (expected daily, weekly, monthly or other)")]
pub struct ParseIntervalError(String);

impl FromStr for ReportingInterval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(ReportingInterval::Daily),
            "weekly" => Ok(ReportingInterval::Weekly),
            "monthly" => Ok(ReportingInterval::Monthly),
            "other" => Ok(ReportingInterval::Other),
            _ => Err(ParseIntervalError(s.to_string())),
        }
    }
}

/// The inclusive date range covered by one Nachweis.
///
/// Invariant: `start <= end`. Daily periods have `start == end`, weekly
/// periods run Monday through Friday of one ISO week, monthly periods cover
/// a full calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The daily period containing `date`.
    pub fn day_of(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// The weekly period (Monday..Friday) containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        Self {
            start: calendar::week_monday(date),
            end: calendar::week_friday(date),
        }
    }

    /// The monthly period (first..last day) containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            start: calendar::month_first_day(date.year(), date.month()),
            end: calendar::month_last_day(date.year(), date.month()),
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} - {}", self.start, self.end)
        }
    }
}

/// One Azubi's reporting schedule.
///
/// `start_date` is the first day of the Ausbildung and may be unset; the
/// coverage engine guards every date computation behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProfile {
    pub start_date: Option<NaiveDate>,
    pub interval: ReportingInterval,
}

impl TrainingProfile {
    pub fn new(start_date: Option<NaiveDate>, interval: ReportingInterval) -> Self {
        Self { start_date, interval }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").expect("valid test date")
    }

    #[test]
    fn interval_round_trips_through_str() {
        for interval in [
            ReportingInterval::Daily,
            ReportingInterval::Weekly,
            ReportingInterval::Monthly,
            ReportingInterval::Other,
        ] {
            assert_eq!(interval.as_str().parse(), Ok(interval));
        }
    }

    #[test]
    fn interval_parse_is_case_insensitive() {
        assert_eq!("WEEKLY".parse(), Ok(ReportingInterval::Weekly));
    }

    #[test]
    fn interval_parse_rejects_unknown_values() {
        assert!("fortnightly".parse::<ReportingInterval>().is_err());
    }

    #[test]
    fn week_of_normalizes_to_monday_and_friday() {
        // 2025-12-04 is a Thursday.
        let period = ReportingPeriod::week_of(d("2025-12-04"));
        assert_eq!(period.start, d("2025-12-01"));
        assert_eq!(period.end, d("2025-12-05"));
    }

    #[test]
    fn month_of_covers_the_whole_month() {
        let period = ReportingPeriod::month_of(d("2025-12-04"));
        assert_eq!(period.start, d("2025-12-01"));
        assert_eq!(period.end, d("2025-12-31"));
    }

    #[test]
    fn day_of_is_a_single_day() {
        let period = ReportingPeriod::day_of(d("2025-12-04"));
        assert_eq!(period.start, period.end);
    }
}
