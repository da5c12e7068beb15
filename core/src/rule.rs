// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::datetime::max_days_in_month;
use crate::error::RuleError;
use crate::weekday::{IsoWeekday, WeekdaySet};

/// How often a rule repeats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Frequency {
    /// Every N days.
    #[default]
    Daily,

    /// Every N weeks, on a set of weekdays.
    Weekly,

    /// Every N months.
    Monthly,

    /// Every N years.
    Yearly,
}

const FREQ_DAILY: &str = "DAILY";
const FREQ_WEEKLY: &str = "WEEKLY";
const FREQ_MONTHLY: &str = "MONTHLY";
const FREQ_YEARLY: &str = "YEARLY";

impl AsRef<str> for Frequency {
    fn as_ref(&self) -> &str {
        match self {
            Frequency::Daily => FREQ_DAILY,
            Frequency::Weekly => FREQ_WEEKLY,
            Frequency::Monthly => FREQ_MONTHLY,
            Frequency::Yearly => FREQ_YEARLY,
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Frequency {
    type Err = RuleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            FREQ_DAILY => Ok(Frequency::Daily),
            FREQ_WEEKLY => Ok(Frequency::Weekly),
            FREQ_MONTHLY => Ok(Frequency::Monthly),
            FREQ_YEARLY => Ok(Frequency::Yearly),
            _ => Err(RuleError::UnknownFrequency(value.to_string())),
        }
    }
}

/// Position of a weekday within a month. Negative positions count from the month end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum WeekOfMonth {
    /// The first occurrence.
    #[cfg_attr(feature = "clap", clap(alias = "1"))]
    First,

    /// The second occurrence.
    #[cfg_attr(feature = "clap", clap(alias = "2"))]
    Second,

    /// The third occurrence.
    #[cfg_attr(feature = "clap", clap(alias = "3"))]
    Third,

    /// The fourth occurrence.
    #[cfg_attr(feature = "clap", clap(alias = "4"))]
    Fourth,

    /// The fifth occurrence, which not every month has.
    #[cfg_attr(feature = "clap", clap(alias = "5"))]
    Fifth,

    /// The last occurrence.
    #[cfg_attr(feature = "clap", clap(alias = "-1"))]
    Last,

    /// The second to last occurrence.
    #[cfg_attr(feature = "clap", clap(alias = "-2"))]
    SecondToLast,

    /// The third to last occurrence.
    #[cfg_attr(feature = "clap", clap(alias = "-3"))]
    ThirdToLast,
}

impl WeekOfMonth {
    /// The signed ordinal: 1..=5, or -1..=-3 from the month end.
    pub const fn ordinal(self) -> i8 {
        match self {
            WeekOfMonth::First => 1,
            WeekOfMonth::Second => 2,
            WeekOfMonth::Third => 3,
            WeekOfMonth::Fourth => 4,
            WeekOfMonth::Fifth => 5,
            WeekOfMonth::Last => -1,
            WeekOfMonth::SecondToLast => -2,
            WeekOfMonth::ThirdToLast => -3,
        }
    }

    /// Looks up a position by its signed ordinal.
    pub const fn from_ordinal(value: i8) -> Option<Self> {
        match value {
            1 => Some(WeekOfMonth::First),
            2 => Some(WeekOfMonth::Second),
            3 => Some(WeekOfMonth::Third),
            4 => Some(WeekOfMonth::Fourth),
            5 => Some(WeekOfMonth::Fifth),
            -1 => Some(WeekOfMonth::Last),
            -2 => Some(WeekOfMonth::SecondToLast),
            -3 => Some(WeekOfMonth::ThirdToLast),
            _ => None,
        }
    }

    /// English ordinal, e.g. "second to last".
    pub const fn name(self) -> &'static str {
        match self {
            WeekOfMonth::First => "first",
            WeekOfMonth::Second => "second",
            WeekOfMonth::Third => "third",
            WeekOfMonth::Fourth => "fourth",
            WeekOfMonth::Fifth => "fifth",
            WeekOfMonth::Last => "last",
            WeekOfMonth::SecondToLast => "second to last",
            WeekOfMonth::ThirdToLast => "third to last",
        }
    }
}

/// Which shape a monthly or yearly pattern takes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PatternMode {
    /// A fixed day number.
    #[default]
    DayOfMonth,

    /// The Nth weekday, e.g. the last Friday.
    DayOfWeek,

    /// A day counted from the end of the month.
    FromMonthEnd,
}

/// Where in the month a monthly rule lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthlyPattern {
    /// On day `day` (1..=31). Months without that day are skipped.
    DayOfMonth {
        /// Day of month.
        day: u8,
    },

    /// On the `week`-th `weekday`.
    DayOfWeek {
        /// The weekday.
        weekday: IsoWeekday,

        /// Its position in the month.
        week: WeekOfMonth,
    },

    /// On the `nth` day counted from the month end, 1 being the last day.
    FromMonthEnd {
        /// Position from the end, 1..=31.
        nth: u8,
    },
}

impl MonthlyPattern {
    /// The sub-mode this pattern belongs to.
    pub const fn mode(&self) -> PatternMode {
        match self {
            MonthlyPattern::DayOfMonth { .. } => PatternMode::DayOfMonth,
            MonthlyPattern::DayOfWeek { .. } => PatternMode::DayOfWeek,
            MonthlyPattern::FromMonthEnd { .. } => PatternMode::FromMonthEnd,
        }
    }

    fn validate(&self) -> Result<(), RuleError> {
        match *self {
            MonthlyPattern::DayOfMonth { day } => check_range("dayOfMonth", day.into(), 1, 31),
            MonthlyPattern::DayOfWeek { .. } => Ok(()),
            MonthlyPattern::FromMonthEnd { nth } => check_range("dayOfMonth", nth.into(), 1, 31),
        }
    }
}

/// Where in the year a yearly rule lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearlyPattern {
    /// On a fixed calendar date.
    Date {
        /// Month, 1..=12.
        month: u8,

        /// Day of month.
        day: u8,
    },

    /// On the `week`-th `weekday` of `month`.
    DayOfWeek {
        /// Month, 1..=12.
        month: u8,

        /// The weekday.
        weekday: IsoWeekday,

        /// Its position in the month.
        week: WeekOfMonth,
    },

    /// On the `nth` day counted from the end of `month`, 1 being the last day.
    FromMonthEnd {
        /// Month, 1..=12.
        month: u8,

        /// Position from the end.
        nth: u8,
    },
}

impl YearlyPattern {
    /// The sub-mode this pattern belongs to.
    pub const fn mode(&self) -> PatternMode {
        match self {
            YearlyPattern::Date { .. } => PatternMode::DayOfMonth,
            YearlyPattern::DayOfWeek { .. } => PatternMode::DayOfWeek,
            YearlyPattern::FromMonthEnd { .. } => PatternMode::FromMonthEnd,
        }
    }

    /// The month the pattern lands in.
    pub const fn month(&self) -> u8 {
        match *self {
            YearlyPattern::Date { month, .. }
            | YearlyPattern::DayOfWeek { month, .. }
            | YearlyPattern::FromMonthEnd { month, .. } => month,
        }
    }

    fn validate(&self) -> Result<(), RuleError> {
        let month = self.month();
        check_range("month", month.into(), 1, 12)?;
        let max = i64::from(max_days_in_month(month));
        match *self {
            YearlyPattern::Date { day, .. } => check_range("day", day.into(), 1, max),
            YearlyPattern::DayOfWeek { .. } => Ok(()),
            YearlyPattern::FromMonthEnd { nth, .. } => {
                check_range("dayOfMonth", nth.into(), 1, max)
            }
        }
    }
}

/// The pattern of a rule; its variant decides the frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Every day, no further pattern.
    Daily,

    /// On the given weekdays.
    Weekly(WeekdaySet),

    /// Once a month.
    Monthly(MonthlyPattern),

    /// Once a year.
    Yearly(YearlyPattern),
}

impl Pattern {
    /// The frequency this pattern implies.
    pub const fn frequency(&self) -> Frequency {
        match self {
            Pattern::Daily => Frequency::Daily,
            Pattern::Weekly(_) => Frequency::Weekly,
            Pattern::Monthly(_) => Frequency::Monthly,
            Pattern::Yearly(_) => Frequency::Yearly,
        }
    }

    fn validate(&self) -> Result<(), RuleError> {
        match self {
            Pattern::Daily => Ok(()),
            Pattern::Weekly(days) if days.is_empty() => Err(RuleError::EmptyWeekdays),
            Pattern::Weekly(_) => Ok(()),
            Pattern::Monthly(monthly) => monthly.validate(),
            Pattern::Yearly(yearly) => yearly.validate(),
        }
    }
}

/// When a rule stops repeating.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Repeats forever.
    #[default]
    Never,

    /// Stops after this many occurrences.
    Count(NonZeroU32),

    /// Stops after this date, inclusive.
    Until(NaiveDate),
}

/// A recurrence rule.
///
/// Fields are private so the invariants hold for every value: the interval is at
/// least 1, a weekly rule has at least one weekday, and `count` and `until` are
/// never both set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "crate::repr::RuleRepr", into = "crate::repr::RuleRepr")]
pub struct RecurrenceRule {
    interval: NonZeroU32,
    pattern: Pattern,
    end: Termination,
}

impl RecurrenceRule {
    /// Creates a rule, checking the pattern's ranges.
    pub fn new(interval: NonZeroU32, pattern: Pattern, end: Termination) -> Result<Self, RuleError> {
        pattern.validate()?;
        Ok(Self {
            interval,
            pattern,
            end,
        })
    }

    /// Every day, forever.
    pub const fn daily() -> Self {
        Self {
            interval: NonZeroU32::MIN,
            pattern: Pattern::Daily,
            end: Termination::Never,
        }
    }

    /// For values whose ranges the caller already enforced.
    pub(crate) fn new_unchecked(interval: NonZeroU32, pattern: Pattern, end: Termination) -> Self {
        debug_assert!(pattern.validate().is_ok(), "invalid pattern: {pattern:?}");
        Self {
            interval,
            pattern,
            end,
        }
    }

    /// The frequency, derived from the pattern.
    pub const fn frequency(&self) -> Frequency {
        self.pattern.frequency()
    }

    /// Every N units.
    pub const fn interval(&self) -> NonZeroU32 {
        self.interval
    }

    /// The day pattern.
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The termination condition.
    pub const fn end(&self) -> Termination {
        self.end
    }

    /// Number of occurrences, if the rule ends by count.
    pub const fn count(&self) -> Option<NonZeroU32> {
        match self.end {
            Termination::Count(n) => Some(n),
            _ => None,
        }
    }

    /// Last possible date, if the rule ends by date.
    pub const fn until(&self) -> Option<NaiveDate> {
        match self.end {
            Termination::Until(date) => Some(date),
            _ => None,
        }
    }

    /// Returns a copy with a different interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: NonZeroU32) -> Self {
        self.interval = interval;
        self
    }

    /// Returns a copy with a different termination.
    #[must_use]
    pub const fn with_end(mut self, end: Termination) -> Self {
        self.end = end;
        self
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::daily()
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), RuleError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RuleError::OutOfRange { field, value })
    }
}
