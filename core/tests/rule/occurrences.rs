// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Occurrence expansion.

use recur_core::{IsoWeekday, MonthlyPattern, RecurrenceRule, Termination, WeekOfMonth};

use crate::common::{anchor, date, monthly, nz, weekly};

#[test]
fn fifth_friday_skips_months_without_one() {
    let rule = monthly(
        1,
        MonthlyPattern::DayOfWeek {
            weekday: IsoWeekday::Friday,
            week: WeekOfMonth::Fifth,
        },
        Termination::Count(nz(3)),
    );
    let all: Vec<_> = rule.occurrences(anchor()).collect();
    assert_eq!(
        all,
        vec![date(2024, 3, 29), date(2024, 5, 31), date(2024, 8, 30)]
    );
}

#[test]
fn weekly_count_spans_weeks() {
    let rule = weekly(
        1,
        &[IsoWeekday::Tuesday, IsoWeekday::Thursday],
        Termination::Count(nz(3)),
    );
    let all: Vec<_> = rule.occurrences(date(2024, 3, 12)).collect();
    assert_eq!(
        all,
        vec![date(2024, 3, 12), date(2024, 3, 14), date(2024, 3, 19)]
    );
}

#[test]
fn until_on_an_occurrence_includes_it() {
    let rule = RecurrenceRule::daily()
        .with_interval(nz(7))
        .with_end(Termination::Until(date(2024, 3, 29)));
    let all: Vec<_> = rule.occurrences(anchor()).collect();
    assert_eq!(all, vec![date(2024, 3, 15), date(2024, 3, 22), date(2024, 3, 29)]);
}
