// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use recur_core::{IsoWeekday, MonthlyPattern, Pattern, RecurrenceRule, Termination, YearlyPattern};

/// Builds a date, panicking on an invalid one.
#[must_use]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The anchor used throughout the tests: 2024-03-15, a Friday.
#[must_use]
pub fn anchor() -> NaiveDate {
    date(2024, 3, 15)
}

#[must_use]
pub fn nz(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

/// A weekly rule on the given days.
#[must_use]
pub fn weekly(interval: u32, days: &[IsoWeekday], end: Termination) -> RecurrenceRule {
    let days = days.iter().copied().collect();
    RecurrenceRule::new(nz(interval), Pattern::Weekly(days), end).unwrap()
}

/// A monthly rule.
#[must_use]
pub fn monthly(interval: u32, pattern: MonthlyPattern, end: Termination) -> RecurrenceRule {
    RecurrenceRule::new(nz(interval), Pattern::Monthly(pattern), end).unwrap()
}

/// A yearly rule.
#[must_use]
pub fn yearly(interval: u32, pattern: YearlyPattern, end: Termination) -> RecurrenceRule {
    RecurrenceRule::new(nz(interval), Pattern::Yearly(pattern), end).unwrap()
}
