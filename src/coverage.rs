// src/coverage.rs
//! Reconciles the periods that should exist against the Nachweise that do.
//!
//! Both entry points are pure: the caller supplies the schedule, an
//! injectable `today` and a snapshot of the already-recorded periods, and
//! gets back either the current period or the ordered list of gaps. An
//! unsupported interval (or a profile without a start date) yields `None`,
//! never an error.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashSet;
use tracing::debug;

use crate::calendar;
use crate::schedule::{ReportingInterval, ReportingPeriod, TrainingProfile};

/// Boundaries of the reporting period containing `today`, regardless of
/// whether a Nachweis has been recorded for it. `None` for `Other`.
pub fn current_period_bounds(
    interval: ReportingInterval,
    today: NaiveDate,
) -> Option<ReportingPeriod> {
    match interval {
        ReportingInterval::Daily => Some(ReportingPeriod::day_of(today)),
        ReportingInterval::Weekly => Some(ReportingPeriod::week_of(today)),
        ReportingInterval::Monthly => Some(ReportingPeriod::month_of(today)),
        ReportingInterval::Other => None,
    }
}

/// The recorded period covering `today`, if the Azubi has already written a
/// Nachweis for the present cycle.
///
/// First match wins; the surrounding application keeps periods unique per
/// user, so ties only arise from caller-supplied duplicates.
pub fn current_period(
    profile: &TrainingProfile,
    today: NaiveDate,
    existing: &[ReportingPeriod],
) -> Option<ReportingPeriod> {
    let bounds = current_period_bounds(profile.interval, today)?;
    existing.iter().copied().find(|period| *period == bounds)
}

/// All past periods with no recorded Nachweis, newest gap first.
///
/// Returns `None` when the profile has no usable interval or no start date
/// ("not applicable", as opposed to `Some(vec![])` for "no gaps"). A period
/// is gap-eligible iff it starts strictly before the period containing
/// `today`, so the current cycle is never reported missing.
pub fn missing_periods(
    profile: &TrainingProfile,
    today: NaiveDate,
    existing: &[ReportingPeriod],
) -> Option<Vec<ReportingPeriod>> {
    let start_date = profile.start_date?;
    if start_date > today {
        // Ausbildung has not begun; nothing can be missing yet.
        return Some(Vec::new());
    }

    let reported: HashSet<NaiveDate> = existing.iter().map(|period| period.start).collect();

    let mut gaps = match profile.interval {
        ReportingInterval::Daily => missing_daily(start_date, today, &reported),
        ReportingInterval::Weekly => missing_weekly(start_date, today, &reported),
        ReportingInterval::Monthly => missing_monthly(start_date, today, &reported),
        ReportingInterval::Other => return None,
    };

    // Hard contract: strictly descending by period start.
    gaps.sort_by(|a, b| b.start.cmp(&a.start));
    debug!(
        "coverage: {} missing {} period(s) between {} and {}",
        gaps.len(),
        profile.interval,
        start_date,
        today
    );
    Some(gaps)
}

/// Every business day in `[start_date, today)` without a report. `today`
/// itself is the current period and excluded.
fn missing_daily(
    start_date: NaiveDate,
    today: NaiveDate,
    reported: &HashSet<NaiveDate>,
) -> Vec<ReportingPeriod> {
    start_date
        .iter_days()
        .take_while(|day| *day < today)
        .filter(|day| calendar::is_business_day(*day))
        .filter(|day| !reported.contains(day))
        .map(ReportingPeriod::day_of)
        .collect()
}

/// The partial first week plus every full week before the current one
/// without a report.
fn missing_weekly(
    start_date: NaiveDate,
    today: NaiveDate,
    reported: &HashSet<NaiveDate>,
) -> Vec<ReportingPeriod> {
    let current_monday = calendar::week_monday(today);
    let first_monday = calendar::week_monday(start_date);
    let mut gaps = Vec::new();

    // The first week of the Ausbildung starts on the start date itself,
    // which is not necessarily a Monday. A weekend start contributes no
    // partial week; the following Monday is covered by the loop below.
    let first_friday = calendar::week_friday(start_date);
    if first_monday < current_monday && start_date <= first_friday && !reported.contains(&start_date)
    {
        gaps.push(ReportingPeriod::new(start_date, first_friday));
    }

    let mut monday = first_monday
        .checked_add_days(Days::new(7))
        .expect("week step stays within the calendar range");
    while monday < current_monday {
        if !reported.contains(&monday) {
            gaps.push(ReportingPeriod::week_of(monday));
        }
        monday = monday
            .checked_add_days(Days::new(7))
            .expect("week step stays within the calendar range");
    }
    gaps
}

/// The partial first month plus every full month before the current one
/// without a report.
fn missing_monthly(
    start_date: NaiveDate,
    today: NaiveDate,
    reported: &HashSet<NaiveDate>,
) -> Vec<ReportingPeriod> {
    let current_first = calendar::month_first_day(today.year(), today.month());
    let start_first = calendar::month_first_day(start_date.year(), start_date.month());
    let mut gaps = Vec::new();

    // The first month runs from the start date itself to the end of that
    // month, whatever day the Ausbildung began on.
    if start_first < current_first && !reported.contains(&start_date) {
        gaps.push(ReportingPeriod::new(
            start_date,
            calendar::month_last_day(start_date.year(), start_date.month()),
        ));
    }

    let mut first = first_of_next_month(start_first);
    while first < current_first {
        if !reported.contains(&first) {
            gaps.push(ReportingPeriod::month_of(first));
        }
        first = first_of_next_month(first);
    }
    gaps
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    calendar::month_first_day(year, month)
}
