// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Rules generated from form selections.

use recur_core::{
    Action, Frequency, IsoWeekday, MonthlyPattern, Pattern, PatternMode, RecurrenceRule,
    WeekOfMonth, WeekdayButton, YearlyPattern,
};
use serde_json::json;

use crate::common::{Harness, anchor};

#[test]
fn fresh_editor_is_daily_every_day() {
    let h = Harness::new(anchor(), None);
    let rule = h.rule();
    assert_eq!(rule, RecurrenceRule::daily());
    assert_eq!(rule.count(), None);
    assert_eq!(rule.until(), None);
    assert_eq!(
        serde_json::to_value(rule).unwrap(),
        json!({ "type": "DAILY", "interval": 1, "pattern": {} })
    );
}

#[test]
fn weekly_monday_wednesday_every_two_weeks() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Weekly))
        .toggle(1) // Monday
        .toggle(3) // Wednesday
        .toggle(5) // Friday, the anchor's weekday
        .dispatch(Action::SetInterval("2".to_string()));

    assert_eq!(
        serde_json::to_value(h.rule()).unwrap(),
        json!({ "type": "WEEKLY", "interval": 2, "pattern": { "daysOfWeek": [1, 3] } })
    );
}

#[test]
fn monthly_last_friday() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Monthly))
        .dispatch(Action::SetMonthlyMode(PatternMode::DayOfWeek))
        .dispatch(Action::SetWeekOfMonth(WeekOfMonth::Last))
        .dispatch(Action::SetWeekday(WeekdayButton::new(5).unwrap()));

    let rule = h.rule();
    assert_eq!(
        rule.pattern(),
        &Pattern::Monthly(MonthlyPattern::DayOfWeek {
            weekday: IsoWeekday::Friday,
            week: WeekOfMonth::Last,
        })
    );
    assert_eq!(
        serde_json::to_value(rule).unwrap()["pattern"],
        json!({ "dayOfWeek": 5, "weekOfMonth": -1 })
    );
}

#[test]
fn weekly_rule_is_never_empty() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Weekly)).toggle(5);

    match h.rule().pattern() {
        Pattern::Weekly(days) => {
            assert!(!days.is_empty());
            assert_eq!(days.numbers(), vec![5]);
        }
        other => panic!("Expected weekly pattern, got {other:?}"),
    }
}

#[test]
fn sunday_button_maps_to_iso_seven() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Weekly))
        .toggle(0)
        .toggle(5);

    match h.rule().pattern() {
        Pattern::Weekly(days) => assert_eq!(days.numbers(), vec![7]),
        other => panic!("Expected weekly pattern, got {other:?}"),
    }
}

#[test]
fn yearly_from_month_end() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Yearly))
        .dispatch(Action::SetYearlyMode(PatternMode::FromMonthEnd))
        .dispatch(Action::SetMonth("2".to_string()))
        .dispatch(Action::SetDaysFromEnd("1".to_string()));

    let rule = h.rule();
    assert_eq!(
        rule.pattern(),
        &Pattern::Yearly(YearlyPattern::FromMonthEnd { month: 2, nth: 1 })
    );
    assert_eq!(
        serde_json::to_value(rule).unwrap()["pattern"],
        json!({ "month": 2, "dayOfMonth": -1 })
    );
}

#[test]
fn yearly_position_follows_anchor_month() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Yearly))
        .dispatch(Action::SetYearlyMode(PatternMode::DayOfWeek));

    assert_eq!(
        h.rule().pattern(),
        &Pattern::Yearly(YearlyPattern::DayOfWeek {
            month: 3,
            weekday: IsoWeekday::Friday,
            week: WeekOfMonth::Third,
        })
    );
}
