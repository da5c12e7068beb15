// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The stored JSON shape of a rule.
//!
//! Rules are stored as an untagged bag of optional pattern fields. Turning that
//! bag back into a typed [`Pattern`] happens here and only here:
//!
//! 1. `type` selects the pattern family.
//! 2. Weekly needs a non-empty `daysOfWeek`; duplicates collapse.
//! 3. Monthly: `weekOfMonth` means day-of-week (with `dayOfWeek`); otherwise a
//!    negative `dayOfMonth` counts from the month end and a positive one is a
//!    fixed day.
//! 4. Yearly: `month` is required, then the same order as monthly, with `day`
//!    (or a positive `dayOfMonth`) for a fixed date.
//! 5. `count` and `until` together are rejected.

use std::num::NonZeroU32;

use chrono::NaiveDate;

use crate::error::RuleError;
use crate::rule::{
    Frequency, MonthlyPattern, Pattern, RecurrenceRule, Termination, WeekOfMonth, YearlyPattern,
};
use crate::weekday::{IsoWeekday, WeekdaySet};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRepr {
    #[serde(rename = "type")]
    frequency: Frequency,

    #[serde(default = "default_interval")]
    interval: u32,

    #[serde(default)]
    pattern: PatternRepr,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    until: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatternRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    days_of_week: Option<Vec<i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    month: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    day: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    day_of_month: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    day_of_week: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    week_of_month: Option<i64>,
}

const fn default_interval() -> u32 {
    1
}

impl TryFrom<RuleRepr> for RecurrenceRule {
    type Error = RuleError;

    fn try_from(raw: RuleRepr) -> Result<Self, Self::Error> {
        let interval = NonZeroU32::new(raw.interval).ok_or(RuleError::InvalidInterval)?;

        let end = match (raw.count, raw.until) {
            (Some(_), Some(_)) => return Err(RuleError::ConflictingTermination),
            (Some(count), None) => match NonZeroU32::new(count) {
                Some(count) => Termination::Count(count),
                None => return Err(RuleError::OutOfRange { field: "count", value: 0 }),
            },
            (None, Some(until)) => Termination::Until(until),
            (None, None) => Termination::Never,
        };

        let p = raw.pattern;
        let pattern = match raw.frequency {
            Frequency::Daily => Pattern::Daily,
            Frequency::Weekly => {
                let days = p.days_of_week.ok_or(RuleError::MissingField("daysOfWeek"))?;
                let set = days
                    .into_iter()
                    .map(|day| weekday("daysOfWeek", day))
                    .collect::<Result<WeekdaySet, _>>()?;
                Pattern::Weekly(set)
            }
            Frequency::Monthly => Pattern::Monthly(monthly(&p)?),
            Frequency::Yearly => Pattern::Yearly(yearly(&p)?),
        };

        RecurrenceRule::new(interval, pattern, end)
    }
}

fn monthly(p: &PatternRepr) -> Result<MonthlyPattern, RuleError> {
    if let Some(week) = p.week_of_month {
        return Ok(MonthlyPattern::DayOfWeek {
            weekday: weekday("dayOfWeek", p.day_of_week.ok_or(RuleError::MissingField("dayOfWeek"))?)?,
            week: week_of_month(week)?,
        });
    }

    match p.day_of_month {
        Some(day) if day < 0 => Ok(MonthlyPattern::FromMonthEnd {
            nth: narrow("dayOfMonth", day.saturating_neg())?,
        }),
        Some(day) => Ok(MonthlyPattern::DayOfMonth {
            day: narrow("dayOfMonth", day)?,
        }),
        None => Err(RuleError::MissingField("dayOfMonth")),
    }
}

fn yearly(p: &PatternRepr) -> Result<YearlyPattern, RuleError> {
    let month = narrow("month", p.month.ok_or(RuleError::MissingField("month"))?)?;

    if let Some(week) = p.week_of_month {
        return Ok(YearlyPattern::DayOfWeek {
            month,
            weekday: weekday("dayOfWeek", p.day_of_week.ok_or(RuleError::MissingField("dayOfWeek"))?)?,
            week: week_of_month(week)?,
        });
    }

    if let Some(day) = p.day_of_month.filter(|d| *d < 0) {
        return Ok(YearlyPattern::FromMonthEnd {
            month,
            nth: narrow("dayOfMonth", day.saturating_neg())?,
        });
    }

    let day = p.day.or(p.day_of_month).ok_or(RuleError::MissingField("day"))?;
    Ok(YearlyPattern::Date {
        month,
        day: narrow("day", day)?,
    })
}

fn narrow(field: &'static str, value: i64) -> Result<u8, RuleError> {
    u8::try_from(value).map_err(|_| RuleError::OutOfRange { field, value })
}

fn weekday(field: &'static str, value: i64) -> Result<IsoWeekday, RuleError> {
    narrow(field, value)
        .ok()
        .and_then(IsoWeekday::from_number)
        .ok_or(RuleError::OutOfRange { field, value })
}

fn week_of_month(value: i64) -> Result<WeekOfMonth, RuleError> {
    i8::try_from(value)
        .ok()
        .and_then(WeekOfMonth::from_ordinal)
        .ok_or(RuleError::OutOfRange {
            field: "weekOfMonth",
            value,
        })
}

impl From<RecurrenceRule> for RuleRepr {
    fn from(rule: RecurrenceRule) -> Self {
        let mut p = PatternRepr::default();
        match *rule.pattern() {
            Pattern::Daily => {}
            Pattern::Weekly(days) => {
                p.days_of_week = Some(days.iter().map(|d| i64::from(d.number())).collect());
            }
            Pattern::Monthly(MonthlyPattern::DayOfMonth { day }) => {
                p.day_of_month = Some(day.into());
            }
            Pattern::Monthly(MonthlyPattern::DayOfWeek { weekday, week }) => {
                p.day_of_week = Some(weekday.number().into());
                p.week_of_month = Some(week.ordinal().into());
            }
            Pattern::Monthly(MonthlyPattern::FromMonthEnd { nth }) => {
                p.day_of_month = Some(-i64::from(nth));
            }
            Pattern::Yearly(YearlyPattern::Date { month, day }) => {
                p.month = Some(month.into());
                p.day = Some(day.into());
            }
            Pattern::Yearly(YearlyPattern::DayOfWeek {
                month,
                weekday,
                week,
            }) => {
                p.month = Some(month.into());
                p.day_of_week = Some(weekday.number().into());
                p.week_of_month = Some(week.ordinal().into());
            }
            Pattern::Yearly(YearlyPattern::FromMonthEnd { month, nth }) => {
                p.month = Some(month.into());
                p.day_of_month = Some(-i64::from(nth));
            }
        }

        RuleRepr {
            frequency: rule.frequency(),
            interval: rule.interval().get(),
            pattern: p,
            count: rule.count().map(NonZeroU32::get),
            until: rule.until(),
        }
    }
}
