// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Seeding the editor from a rule and generating it again.

use recur_core::{
    Config, EditorState, EndMode, Frequency, IsoWeekday, MonthlyPattern, RecurrenceRule,
    Termination, WeekOfMonth, YearlyPattern, generate_rule,
};

use crate::common::{anchor, date, monthly, nz, weekly, yearly};

fn rules() -> Vec<RecurrenceRule> {
    vec![
        RecurrenceRule::daily(),
        RecurrenceRule::daily().with_interval(nz(3)),
        weekly(
            2,
            &[IsoWeekday::Monday, IsoWeekday::Wednesday],
            Termination::Never,
        ),
        weekly(1, &[IsoWeekday::Sunday], Termination::Count(nz(10))),
        monthly(1, MonthlyPattern::DayOfMonth { day: 31 }, Termination::Never),
        monthly(
            1,
            MonthlyPattern::DayOfWeek {
                weekday: IsoWeekday::Friday,
                week: WeekOfMonth::Last,
            },
            Termination::Until(date(2025, 1, 1)),
        ),
        monthly(6, MonthlyPattern::FromMonthEnd { nth: 3 }, Termination::Never),
        yearly(1, YearlyPattern::Date { month: 2, day: 29 }, Termination::Never),
        yearly(
            1,
            YearlyPattern::DayOfWeek {
                month: 11,
                weekday: IsoWeekday::Thursday,
                week: WeekOfMonth::Fourth,
            },
            Termination::Count(nz(5)),
        ),
        yearly(
            2,
            YearlyPattern::FromMonthEnd { month: 12, nth: 1 },
            Termination::Until(date(2030, 12, 31)),
        ),
    ]
}

#[test]
fn seeded_editor_reproduces_rule() {
    let config = Config::default();
    for rule in rules() {
        let state = EditorState::new(anchor(), Some(&rule), &config);
        assert_eq!(generate_rule(&state), rule, "{rule}");
    }
}

#[test]
fn seeded_editor_reproduces_rule_after_json() {
    let config = Config::default();
    for rule in rules() {
        let json = serde_json::to_string(&rule).unwrap();
        let loaded: RecurrenceRule = serde_json::from_str(&json).unwrap();
        let state = EditorState::new(anchor(), Some(&loaded), &config);
        assert_eq!(generate_rule(&state), rule, "{json}");
    }
}

#[test]
fn seeding_keeps_anchor_defaults_for_other_sections() {
    let rule = weekly(1, &[IsoWeekday::Tuesday], Termination::Count(nz(3)));
    let state = EditorState::new(anchor(), Some(&rule), &Config::default());

    assert_eq!(state.frequency(), Frequency::Weekly);
    assert_eq!(state.end_mode(), EndMode::Count);
    assert_eq!(state.monthly(), MonthlyPattern::DayOfMonth { day: 15 });
    assert_eq!(state.yearly(), YearlyPattern::Date { month: 3, day: 15 });
    assert_eq!(state.until(), date(2024, 6, 13));
}
