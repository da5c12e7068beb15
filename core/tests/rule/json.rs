// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Stored JSON shape.

use recur_core::{
    IsoWeekday, MonthlyPattern, Pattern, RecurrenceRule, Termination, WeekOfMonth, YearlyPattern,
};
use serde_json::json;

use crate::common::{date, monthly, nz, weekly, yearly};

#[test]
fn json_round_trip_preserves_every_shape() {
    let rules = [
        RecurrenceRule::daily().with_end(Termination::Until(date(2024, 6, 15))),
        weekly(
            2,
            &[IsoWeekday::Saturday, IsoWeekday::Sunday],
            Termination::Count(nz(8)),
        ),
        monthly(1, MonthlyPattern::DayOfMonth { day: 15 }, Termination::Never),
        monthly(
            3,
            MonthlyPattern::DayOfWeek {
                weekday: IsoWeekday::Monday,
                week: WeekOfMonth::SecondToLast,
            },
            Termination::Never,
        ),
        monthly(1, MonthlyPattern::FromMonthEnd { nth: 5 }, Termination::Never),
        yearly(1, YearlyPattern::Date { month: 12, day: 25 }, Termination::Never),
        yearly(
            1,
            YearlyPattern::DayOfWeek {
                month: 5,
                weekday: IsoWeekday::Sunday,
                week: WeekOfMonth::Second,
            },
            Termination::Never,
        ),
        yearly(1, YearlyPattern::FromMonthEnd { month: 2, nth: 1 }, Termination::Never),
    ];

    for rule in rules {
        let json = serde_json::to_string(&rule).unwrap();
        let back: RecurrenceRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule, "{json}");
    }
}

#[test]
fn loads_rules_saved_with_extra_unused_fields() {
    // Saved forms may carry fields of other sub-modes
    let value = json!({
        "type": "MONTHLY",
        "interval": 1,
        "pattern": { "daysOfWeek": [1], "dayOfMonth": 10, "month": 4 },
    });
    let rule: RecurrenceRule = serde_json::from_value(value).unwrap();
    assert_eq!(
        rule.pattern(),
        &Pattern::Monthly(MonthlyPattern::DayOfMonth { day: 10 })
    );
}

#[test]
fn week_of_month_wins_over_day_of_month() {
    let value = json!({
        "type": "MONTHLY",
        "interval": 1,
        "pattern": { "dayOfMonth": 3, "dayOfWeek": 2, "weekOfMonth": 1 },
    });
    let rule: RecurrenceRule = serde_json::from_value(value).unwrap();
    assert_eq!(
        rule.pattern(),
        &Pattern::Monthly(MonthlyPattern::DayOfWeek {
            weekday: IsoWeekday::Tuesday,
            week: WeekOfMonth::First,
        })
    );
}

#[test]
fn unknown_type_is_rejected() {
    let value = json!({ "type": "HOURLY", "interval": 1, "pattern": {} });
    assert!(serde_json::from_value::<RecurrenceRule>(value).is_err());
}

#[test]
fn yearly_day_must_fit_month() {
    let value = json!({ "type": "YEARLY", "interval": 1, "pattern": { "month": 4, "day": 31 } });
    let err = serde_json::from_value::<RecurrenceRule>(value).unwrap_err();
    assert!(err.to_string().contains("day out of range: 31"), "{err}");
}
