// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Form state of the rule editor.
//!
//! [`EditorState`] keeps one working value per form section, so switching the
//! frequency back and forth never loses a selection. [`generate_rule`] turns the
//! state into a rule; it never fails.

use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate};

use crate::config::Config;
use crate::datetime::{add_days, max_days_in_month, nth_from_month_end, week_of_month};
use crate::dispatcher::Action;
use crate::input::{clamped_int, date_or};
use crate::rule::{
    Frequency, MonthlyPattern, Pattern, PatternMode, RecurrenceRule, Termination, YearlyPattern,
};
use crate::weekday::{IsoWeekday, WeekdaySet};

/// How the rule ends, as selected in the form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EndMode {
    /// Never ends.
    #[default]
    Never,

    /// Ends after a number of occurrences.
    Count,

    /// Ends on a date.
    Until,
}

/// Working state of the rule form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    anchor: NaiveDate,
    default_until_days: u32,

    repeat: bool,
    frequency: Frequency,
    interval: NonZeroU32,
    weekdays: WeekdaySet,
    monthly: MonthlyPattern,
    yearly: YearlyPattern,
    end_mode: EndMode,
    count: NonZeroU32,
    until: NaiveDate,
}

impl EditorState {
    /// Seeds the form from the anchor date, then from `value` when editing.
    pub fn new(anchor: NaiveDate, value: Option<&RecurrenceRule>, config: &Config) -> Self {
        let mut state = Self {
            anchor,
            default_until_days: config.default_until_days,
            repeat: true,
            frequency: Frequency::Daily,
            interval: NonZeroU32::MIN,
            weekdays: WeekdaySet::single(IsoWeekday::of(anchor)),
            monthly: seed_monthly(PatternMode::DayOfMonth, anchor),
            yearly: seed_yearly(PatternMode::DayOfMonth, anchor),
            end_mode: EndMode::Never,
            count: config.default_count,
            until: add_days(anchor, config.default_until_days),
        };

        if let Some(rule) = value {
            state.frequency = rule.frequency();
            state.interval = rule.interval();
            match *rule.pattern() {
                Pattern::Daily => {}
                Pattern::Weekly(days) => state.weekdays = days,
                Pattern::Monthly(monthly) => state.monthly = monthly,
                Pattern::Yearly(yearly) => state.yearly = yearly,
            }
            match rule.end() {
                Termination::Never => state.end_mode = EndMode::Never,
                Termination::Count(count) => {
                    state.end_mode = EndMode::Count;
                    state.count = count;
                }
                Termination::Until(until) => {
                    state.end_mode = EndMode::Until;
                    state.until = until;
                }
            }
        }

        tracing::debug!(?state, "editor seeded");
        state
    }

    /// The date the defaults derive from.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Whether the rule repeats at all.
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> NonZeroU32 {
        self.interval
    }

    /// The weekly selection.
    pub fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    pub fn monthly(&self) -> MonthlyPattern {
        self.monthly
    }

    pub fn yearly(&self) -> YearlyPattern {
        self.yearly
    }

    pub fn end_mode(&self) -> EndMode {
        self.end_mode
    }

    /// The count input, kept while another end mode is selected.
    pub fn count(&self) -> NonZeroU32 {
        self.count
    }

    /// The until input, kept while another end mode is selected.
    pub fn until(&self) -> NaiveDate {
        self.until
    }

    /// The rule to publish: `None` while repeating is switched off.
    pub fn output(&self) -> Option<RecurrenceRule> {
        self.repeat.then(|| generate_rule(self))
    }

    /// Applies an action, returning whether the state changed.
    pub fn apply(&mut self, action: &Action) -> bool {
        let before = self.clone();
        match action {
            Action::SetRepeat(repeat) => self.repeat = *repeat,
            Action::SetFrequency(frequency) => self.frequency = *frequency,
            Action::SetInterval(v) => self.interval = to_nonzero(clamped_int(v, 1, 1, MAX_INPUT)),
            Action::ToggleWeekday(button) => {
                let day = IsoWeekday::from(*button);
                if !self.weekdays.contains(day) {
                    self.weekdays.insert(day);
                } else if self.weekdays.len() > 1 {
                    self.weekdays.remove(day);
                } else {
                    tracing::debug!(%day, "refusing to remove the last weekday");
                }
            }
            Action::SetMonthlyMode(mode) => {
                if self.monthly.mode() != *mode {
                    self.monthly = seed_monthly(*mode, self.anchor);
                }
            }
            Action::SetYearlyMode(mode) => {
                if self.yearly.mode() != *mode {
                    self.yearly = seed_yearly(*mode, self.anchor);
                }
            }
            Action::SetMonth(v) => self.set_month(v),
            Action::SetDayOfMonth(v) => self.set_day_of_month(v),
            Action::SetWeekOfMonth(w) => {
                let applied = match (self.frequency, &mut self.monthly, &mut self.yearly) {
                    (Frequency::Monthly, MonthlyPattern::DayOfWeek { week, .. }, _)
                    | (Frequency::Yearly, _, YearlyPattern::DayOfWeek { week, .. }) => {
                        *week = *w;
                        true
                    }
                    _ => false,
                };
                if !applied {
                    self.ignored(action);
                }
            }
            Action::SetWeekday(button) => {
                let day = IsoWeekday::from(*button);
                let applied = match (self.frequency, &mut self.monthly, &mut self.yearly) {
                    (Frequency::Monthly, MonthlyPattern::DayOfWeek { weekday, .. }, _)
                    | (Frequency::Yearly, _, YearlyPattern::DayOfWeek { weekday, .. }) => {
                        *weekday = day;
                        true
                    }
                    _ => false,
                };
                if !applied {
                    self.ignored(action);
                }
            }
            Action::SetDaysFromEnd(v) => self.set_days_from_end(v),
            Action::SetEndMode(mode) => self.end_mode = *mode,
            Action::SetCount(v) => self.count = to_nonzero(clamped_int(v, 1, 1, MAX_INPUT)),
            Action::SetUntil(v) => self.until = date_or(v, self.anchor, self.default_until_days),
        }

        let changed = *self != before;
        tracing::debug!(?action, changed, "applied action");
        changed
    }

    fn set_month(&mut self, v: &str) {
        if self.frequency != Frequency::Yearly {
            return self.ignored(&Action::SetMonth(v.to_string()));
        }

        let new_month = clamped_int(v, 1, 1, 12) as u8;
        let max = max_days_in_month(new_month);
        match &mut self.yearly {
            YearlyPattern::Date { month, day } => {
                *month = new_month;
                *day = (*day).min(max);
            }
            YearlyPattern::DayOfWeek { month, .. } => *month = new_month,
            YearlyPattern::FromMonthEnd { month, nth } => {
                *month = new_month;
                *nth = (*nth).min(max);
            }
        }
    }

    fn set_day_of_month(&mut self, v: &str) {
        let target = match (self.frequency, &mut self.monthly, &mut self.yearly) {
            (Frequency::Monthly, MonthlyPattern::DayOfMonth { day }, _) => Some((day, 31)),
            (Frequency::Yearly, _, YearlyPattern::Date { month, day }) => {
                Some((day, max_days_in_month(*month)))
            }
            _ => None,
        };
        match target {
            Some((day, max)) => *day = clamped_int(v, 1, 1, max.into()) as u8,
            None => self.ignored(&Action::SetDayOfMonth(v.to_string())),
        }
    }

    fn set_days_from_end(&mut self, v: &str) {
        let target = match (self.frequency, &mut self.monthly, &mut self.yearly) {
            (Frequency::Monthly, MonthlyPattern::FromMonthEnd { nth }, _) => Some((nth, 31)),
            (Frequency::Yearly, _, YearlyPattern::FromMonthEnd { month, nth }) => {
                Some((nth, max_days_in_month(*month)))
            }
            _ => None,
        };
        match target {
            Some((nth, max)) => *nth = clamped_int(v, 1, 1, max.into()) as u8,
            None => self.ignored(&Action::SetDaysFromEnd(v.to_string())),
        }
    }

    fn ignored(&self, action: &Action) {
        tracing::debug!(
            ?action,
            frequency = %self.frequency,
            monthly = ?self.monthly.mode(),
            yearly = ?self.yearly.mode(),
            "action does not apply to the active pattern, ignored"
        );
    }
}

/// Upper bound for free numeric inputs.
const MAX_INPUT: i64 = u32::MAX as i64;

fn to_nonzero(value: i64) -> NonZeroU32 {
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MIN)
}

fn seed_monthly(mode: PatternMode, anchor: NaiveDate) -> MonthlyPattern {
    match mode {
        PatternMode::DayOfMonth => MonthlyPattern::DayOfMonth {
            day: anchor.day() as u8,
        },
        PatternMode::DayOfWeek => MonthlyPattern::DayOfWeek {
            weekday: IsoWeekday::of(anchor),
            week: week_of_month(anchor),
        },
        PatternMode::FromMonthEnd => MonthlyPattern::FromMonthEnd {
            nth: nth_from_month_end(anchor),
        },
    }
}

fn seed_yearly(mode: PatternMode, anchor: NaiveDate) -> YearlyPattern {
    let month = anchor.month() as u8;
    match mode {
        PatternMode::DayOfMonth => YearlyPattern::Date {
            month,
            day: anchor.day() as u8,
        },
        PatternMode::DayOfWeek => YearlyPattern::DayOfWeek {
            month,
            weekday: IsoWeekday::of(anchor),
            week: week_of_month(anchor),
        },
        PatternMode::FromMonthEnd => YearlyPattern::FromMonthEnd {
            month,
            nth: nth_from_month_end(anchor),
        },
    }
}

/// Builds the rule the form currently describes.
///
/// An empty weekly selection falls back to the anchor's weekday, so a weekly
/// rule always has at least one day.
pub fn generate_rule(state: &EditorState) -> RecurrenceRule {
    let pattern = match state.frequency {
        Frequency::Daily => Pattern::Daily,
        Frequency::Weekly if state.weekdays.is_empty() => {
            Pattern::Weekly(WeekdaySet::single(IsoWeekday::of(state.anchor)))
        }
        Frequency::Weekly => Pattern::Weekly(state.weekdays),
        Frequency::Monthly => Pattern::Monthly(state.monthly),
        Frequency::Yearly => Pattern::Yearly(state.yearly),
    };

    let end = match state.end_mode {
        EndMode::Never => Termination::Never,
        EndMode::Count => Termination::Count(state.count),
        EndMode::Until => Termination::Until(state.until),
    };

    RecurrenceRule::new_unchecked(state.interval, pattern, end)
}
