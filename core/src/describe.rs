// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use crate::datetime::{STABLE_FORMAT_DATEONLY, month_name};
use crate::rule::{Frequency, MonthlyPattern, Pattern, RecurrenceRule, Termination, YearlyPattern};

impl RecurrenceRule {
    /// A one-line English summary, e.g. "every 2 weeks on Monday, Wednesday".
    pub fn describe(&self) -> String {
        Summary(self).to_string()
    }
}

struct Summary<'a>(&'a RecurrenceRule);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.0;
        let unit = match rule.frequency() {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        };

        match rule.interval().get() {
            1 => write!(f, "every {unit}")?,
            n => write!(f, "every {n} {unit}s")?,
        }

        match *rule.pattern() {
            Pattern::Daily => {}
            Pattern::Weekly(days) => {
                f.write_str(" on ")?;
                for (i, day) in days.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(day.name())?;
                }
            }
            Pattern::Monthly(MonthlyPattern::DayOfMonth { day }) => write!(f, " on day {day}")?,
            Pattern::Monthly(MonthlyPattern::DayOfWeek { weekday, week }) => {
                write!(f, " on the {} {}", week.name(), weekday.name())?;
            }
            Pattern::Monthly(MonthlyPattern::FromMonthEnd { nth }) => {
                write!(f, " on the {}", from_end(nth))?;
            }
            Pattern::Yearly(YearlyPattern::Date { month, day }) => {
                write!(f, " on {} {day}", month_name(month))?;
            }
            Pattern::Yearly(YearlyPattern::DayOfWeek {
                month,
                weekday,
                week,
            }) => write!(
                f,
                " on the {} {} of {}",
                week.name(),
                weekday.name(),
                month_name(month)
            )?,
            Pattern::Yearly(YearlyPattern::FromMonthEnd { month, nth }) => {
                write!(f, " on the {} of {}", from_end(nth), month_name(month))?;
            }
        }

        match rule.end() {
            Termination::Never => Ok(()),
            Termination::Count(n) if n.get() == 1 => f.write_str(", once"),
            Termination::Count(n) => write!(f, ", {n} times"),
            Termination::Until(date) => {
                write!(f, ", until {}", date.format(STABLE_FORMAT_DATEONLY))
            }
        }
    }
}

fn from_end(nth: u8) -> String {
    match nth {
        1 => "last day".to_string(),
        n => format!("{} to last day", ordinal(n)),
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `21st`.
fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
