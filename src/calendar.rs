// src/calendar.rs
//! Week and month arithmetic for the Nachweis schedule.
//!
//! These helpers are the numeric basis for numbering new Nachweise
//! (Ausbildungswoche) and for enumerating reporting periods, so they have
//! to be exact. All of them treat a reversed range (`end < start`) as
//! empty and return 0 instead of failing.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The Monday of the ISO week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset))
        .expect("weekday offset stays within the calendar range")
}

/// The Friday of the ISO week containing `date`.
pub fn week_friday(date: NaiveDate) -> NaiveDate {
    week_monday(date)
        .checked_add_days(Days::new(4))
        .expect("weekday offset stays within the calendar range")
}

/// The first calendar day of the given month.
pub fn month_first_day(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid year/month")
}

/// The last calendar day of the given month (leap years included).
pub fn month_last_day(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("valid year/month")
        .pred_opt()
        .expect("first of a month always has a predecessor")
}

/// Number of distinct ISO weeks spanned from `start`'s week through `end`'s
/// week, both inclusive. A date always covers its own week, so
/// `count_week_numbers(d, d) == 1`.
pub fn count_week_numbers(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    // Normalize both ends to the Monday of their week, then convert the
    // day difference to weeks (+1).
    let days = (week_monday(end) - week_monday(start)).num_days();
    (days / 7 + 1) as u32
}

/// Number of month boundaries crossed between `start` and `end`. The day of
/// month is irrelevant; two dates in the same month count 0.
pub fn count_months(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months as u32
}

/// Whether `date` falls on Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    let weekday = date.weekday();
    weekday != Weekday::Sat && weekday != Weekday::Sun
}

/// Count of business days (Monday-Friday) in `[start, end]`, inclusive.
pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_business_day(*day))
        .count() as u32
}
