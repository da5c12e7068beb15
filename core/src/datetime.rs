// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, NaiveDate};

use crate::rule::WeekOfMonth;
use crate::weekday::IsoWeekday;

/// NOTE: Used for storing rules, so it should be stable across different runs.
pub const STABLE_FORMAT_DATEONLY: &str = "%Y-%m-%d";

/// Compact date form used by RRULE `UNTIL`.
pub const RRULE_FORMAT_DATEONLY: &str = "%Y%m%d";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for 1..=12.
pub fn month_name(month: u8) -> &'static str {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .unwrap_or("?")
}

/// The longest the month can be in any year, so February counts 29.
pub const fn max_days_in_month(month: u8) -> u8 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Number of days of `month` in `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

/// Week position of the date in its month, counted from the start: day 1..=7 is
/// the first, 29..=31 the fifth.
pub fn week_of_month(date: NaiveDate) -> WeekOfMonth {
    let nth = (date.day() - 1) / 7 + 1;
    WeekOfMonth::from_ordinal(nth as i8).unwrap_or(WeekOfMonth::Fifth)
}

/// Position of the date counted from the end of its month, 1 being the last day.
pub fn nth_from_month_end(date: NaiveDate) -> u8 {
    let days = days_in_month(date.year(), date.month());
    (days - date.day() + 1) as u8
}

/// The `week`-th `weekday` of the month, if the month has one.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: IsoWeekday,
    week: WeekOfMonth,
) -> Option<NaiveDate> {
    let ordinal = week.ordinal();
    if ordinal > 0 {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday.into(), ordinal as u8)
    } else {
        let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
        let back = (7 + last.weekday().num_days_from_monday() - weekday as u32 + 1) % 7;
        let weeks_back = u64::from((-ordinal) as u8 - 1) * 7;
        last.checked_sub_days(Days::new(u64::from(back) + weeks_back))
    }
}

/// The `nth` day counted from the end of the month, if the month is long enough.
pub fn nth_from_end_of_month(year: i32, month: u32, nth: u8) -> Option<NaiveDate> {
    let days = days_in_month(year, month);
    let day = days.checked_sub(u32::from(nth))? + 1;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), STABLE_FORMAT_DATEONLY).ok()
}

/// Adds days, saturating at the largest representable date.
pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(days.into()))
        .unwrap_or(NaiveDate::MAX)
}
