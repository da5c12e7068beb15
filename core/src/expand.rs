// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, NaiveDate};

use crate::datetime::{nth_from_end_of_month, nth_weekday_of_month};
use crate::rule::{MonthlyPattern, Pattern, RecurrenceRule, YearlyPattern};

/// Give up after this many periods in a row without a single date.
const MAX_EMPTY_PERIODS: u32 = 1000;

impl RecurrenceRule {
    /// Dates the rule produces on or after `start`, in ascending order.
    ///
    /// Periods are aligned to `start`: its day, its ISO week, its month or its
    /// year, advanced by the interval.
    pub fn occurrences(&self, start: NaiveDate) -> Occurrences {
        Occurrences {
            rule: *self,
            start,
            period: 0,
            pending: Vec::new().into_iter(),
            emitted: 0,
            empty_periods: 0,
            done: false,
        }
    }
}

/// Iterator returned by [`RecurrenceRule::occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences {
    rule: RecurrenceRule,
    start: NaiveDate,
    period: u32,
    pending: std::vec::IntoIter<NaiveDate>,
    emitted: u32,
    empty_periods: u32,
    done: bool,
}

impl Occurrences {
    /// Candidate dates of the `k`-th period, or `None` once past the calendar range.
    fn candidates(&self, k: u32) -> Option<Vec<NaiveDate>> {
        let step = k.checked_mul(self.rule.interval().get())?;
        let start = self.start;

        let dates = match *self.rule.pattern() {
            Pattern::Daily => vec![start.checked_add_days(Days::new(step.into()))?],
            Pattern::Weekly(days) => {
                let monday = start
                    .checked_sub_days(Days::new(start.weekday().num_days_from_monday().into()))?;
                let week = monday.checked_add_days(Days::new(u64::from(step) * 7))?;
                days.iter()
                    .filter_map(|day| week.checked_add_days(Days::new(u64::from(day.number() - 1))))
                    .collect()
            }
            Pattern::Monthly(monthly) => {
                let total = i64::from(start.year()) * 12 + i64::from(start.month0()) + i64::from(step);
                let year = i32::try_from(total.div_euclid(12)).ok()?;
                if year > NaiveDate::MAX.year() {
                    return None;
                }
                let month = (total.rem_euclid(12) + 1) as u32;
                let date = match monthly {
                    MonthlyPattern::DayOfMonth { day } => {
                        NaiveDate::from_ymd_opt(year, month, day.into())
                    }
                    MonthlyPattern::DayOfWeek { weekday, week } => {
                        nth_weekday_of_month(year, month, weekday, week)
                    }
                    MonthlyPattern::FromMonthEnd { nth } => nth_from_end_of_month(year, month, nth),
                };
                date.into_iter().collect()
            }
            Pattern::Yearly(yearly) => {
                let year = start.year().checked_add(i32::try_from(step).ok()?)?;
                if year > NaiveDate::MAX.year() {
                    return None;
                }
                let month = u32::from(yearly.month());
                let date = match yearly {
                    YearlyPattern::Date { day, .. } => NaiveDate::from_ymd_opt(year, month, day.into()),
                    YearlyPattern::DayOfWeek { weekday, week, .. } => {
                        nth_weekday_of_month(year, month, weekday, week)
                    }
                    YearlyPattern::FromMonthEnd { nth, .. } => nth_from_end_of_month(year, month, nth),
                };
                date.into_iter().collect()
            }
        };
        Some(dates)
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if let Some(date) = self.pending.next() {
                if self.rule.until().is_some_and(|until| date > until) {
                    self.done = true;
                    break;
                }

                self.emitted += 1;
                if self.rule.count().is_some_and(|count| self.emitted >= count.get()) {
                    self.done = true;
                }
                return Some(date);
            }

            if self.empty_periods >= MAX_EMPTY_PERIODS {
                tracing::debug!(rule = %self.rule, start = %self.start, "no occurrences in {MAX_EMPTY_PERIODS} periods, stopping");
                self.done = true;
                break;
            }

            let Some(dates) = self.candidates(self.period) else {
                self.done = true;
                break;
            };
            self.period += 1;

            let start = self.start;
            let dates: Vec<_> = dates.into_iter().filter(|d| *d >= start).collect();
            if dates.is_empty() {
                self.empty_periods += 1;
            } else {
                self.empty_periods = 0;
                self.pending = dates.into_iter();
            }
        }
        None
    }
}
