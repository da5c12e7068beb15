// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! RRULE text.

use recur_core::{IsoWeekday, RecurrenceRule, RuleError, Termination};

use crate::common::{date, nz, weekly};

#[test]
fn rrule_and_json_agree() {
    let text = "RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE;UNTIL=20240615";
    let rule: RecurrenceRule = text.parse().unwrap();
    assert_eq!(
        rule,
        weekly(
            2,
            &[IsoWeekday::Monday, IsoWeekday::Wednesday],
            Termination::Until(date(2024, 6, 15))
        )
    );
    assert_eq!(
        serde_json::to_string(&rule).unwrap(),
        r#"{"type":"WEEKLY","interval":2,"pattern":{"daysOfWeek":[1,3]},"until":"2024-06-15"}"#
    );
}

#[test]
fn formatted_text_parses_back() {
    let rule = weekly(1, &[IsoWeekday::Sunday], Termination::Count(nz(4)));
    let text = rule.to_string();
    assert_eq!(text, "FREQ=WEEKLY;INTERVAL=1;BYDAY=SU;COUNT=4");
    assert_eq!(text.parse::<RecurrenceRule>(), Ok(rule));
}

#[test]
fn errors_render_readably() {
    let err = "FREQ=DAILY;COUNT=1;UNTIL=20240101"
        .parse::<RecurrenceRule>()
        .unwrap_err();
    assert_eq!(err, RuleError::ConflictingTermination);
    assert_eq!(err.to_string(), "count and until must not both be set");
}

#[test]
fn monday_week_start_is_accepted() {
    let rule: RecurrenceRule = "RRULE:FREQ=WEEKLY;WKST=MO;BYDAY=MO,WE".parse().unwrap();
    assert_eq!(
        rule,
        weekly(
            1,
            &[IsoWeekday::Monday, IsoWeekday::Wednesday],
            Termination::Never
        )
    );
}
