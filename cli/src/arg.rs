// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, arg, value_parser};
use clap_num::number_range;
use recur_core::{
    Action, EditorState, EndMode, Frequency, IsoWeekday, PatternMode, STABLE_FORMAT_DATEONLY,
    WeekOfMonth, WeekdaySet, parse_date,
};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
    Rrule,
}

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> ArgOutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }

    pub fn date() -> Arg {
        arg!(-d --date <DATE> "Anchor date the defaults derive from, YYYY-MM-DD (default: today)")
            .value_parser(parse_date_arg)
    }

    pub fn get_date(matches: &ArgMatches) -> Option<NaiveDate> {
        matches.get_one("date").copied()
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("Invalid date '{s}'. Expected format: YYYY-MM-DD"))
}

/// How a rule ends, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndArg {
    Never,
    Count(u32),
    Until(NaiveDate),
}

/// Form selections given as flags. Unset flags leave the form untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleArgs {
    pub repeat: Option<bool>,
    pub freq: Option<Frequency>,
    pub interval: Option<u32>,
    pub days: Vec<IsoWeekday>,
    pub monthly_mode: Option<PatternMode>,
    pub yearly_mode: Option<PatternMode>,
    pub month: Option<u8>,
    pub day_of_month: Option<u8>,
    pub week: Option<WeekOfMonth>,
    pub weekday: Option<IsoWeekday>,
    pub days_from_end: Option<u8>,
    pub end: Option<EndArg>,
}

impl RuleArgs {
    pub fn args() -> Vec<Arg> {
        fn at_least_1(s: &str) -> Result<u32, String> {
            number_range(s, 1, u32::MAX)
        }

        fn from_1_to_12(s: &str) -> Result<u8, String> {
            number_range(s, 1, 12)
        }

        fn from_1_to_31(s: &str) -> Result<u8, String> {
            number_range(s, 1, 31)
        }

        vec![
            arg!(--repeat "Turn repetition on")
                .action(ArgAction::SetTrue)
                .overrides_with("no-repeat"),
            arg!(--"no-repeat" "Turn repetition off, the output becomes null")
                .action(ArgAction::SetTrue)
                .overrides_with("repeat"),
            arg!(-f --freq <FREQ> "How often the rule repeats")
                .value_parser(value_parser!(Frequency)),
            arg!(-i --interval <N> "Repeat every N units").value_parser(at_least_1),
            arg!(--days <DAYS> "Weekdays of a weekly rule, e.g. mo,we,fr")
                .value_parser(value_parser!(IsoWeekday))
                .value_delimiter(',')
                .action(ArgAction::Append),
            arg!(--"monthly-mode" <MODE> "Shape of a monthly rule")
                .value_parser(value_parser!(PatternMode)),
            arg!(--"yearly-mode" <MODE> "Shape of a yearly rule")
                .value_parser(value_parser!(PatternMode)),
            arg!(--month <MONTH> "Month of a yearly rule (1-12)").value_parser(from_1_to_12),
            arg!(--"day-of-month" <DAY> "Day number (1-31), clamped to the month length")
                .value_parser(from_1_to_31),
            arg!(--week <WEEK> "Week of the month, e.g. first, last, -2")
                .value_parser(value_parser!(WeekOfMonth))
                .allow_hyphen_values(true),
            arg!(--weekday <WEEKDAY> "Weekday of a day-of-week rule")
                .value_parser(value_parser!(IsoWeekday)),
            arg!(--"days-from-end" <N> "Day counted from the month end, 1 being the last day")
                .value_parser(from_1_to_31),
            arg!(--never "The rule never ends").action(ArgAction::SetTrue),
            arg!(--count <N> "End after N occurrences").value_parser(at_least_1),
            arg!(--until <DATE> "End on this date, inclusive, YYYY-MM-DD")
                .value_parser(parse_date_arg),
        ]
    }

    pub fn group() -> ArgGroup {
        ArgGroup::new("end")
            .args(["never", "count", "until"])
            .multiple(false)
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let repeat = if matches.get_flag("repeat") {
            Some(true)
        } else if matches.get_flag("no-repeat") {
            Some(false)
        } else {
            None
        };

        let end = if matches.get_flag("never") {
            Some(EndArg::Never)
        } else if let Some(count) = matches.get_one::<u32>("count") {
            Some(EndArg::Count(*count))
        } else {
            matches
                .get_one::<NaiveDate>("until")
                .map(|until| EndArg::Until(*until))
        };

        Self {
            repeat,
            freq: matches.get_one("freq").copied(),
            interval: matches.get_one("interval").copied(),
            days: matches
                .get_many::<IsoWeekday>("days")
                .map(|days| days.copied().collect())
                .unwrap_or_default(),
            monthly_mode: matches.get_one("monthly-mode").copied(),
            yearly_mode: matches.get_one("yearly-mode").copied(),
            month: matches.get_one("month").copied(),
            day_of_month: matches.get_one("day-of-month").copied(),
            week: matches.get_one("week").copied(),
            weekday: matches.get_one("weekday").copied(),
            days_from_end: matches.get_one("days-from-end").copied(),
            end,
        }
    }

    /// Translates the flags into form actions against the current state.
    ///
    /// Mode switches come before field edits, and position flags imply their
    /// mode when none is given for the active frequency.
    pub fn actions(&self, state: &EditorState) -> Vec<Action> {
        let mut actions = Vec::new();

        if let Some(repeat) = self.repeat {
            actions.push(Action::SetRepeat(repeat));
        }
        if let Some(freq) = self.freq {
            actions.push(Action::SetFrequency(freq));
        }
        if let Some(interval) = self.interval {
            actions.push(Action::SetInterval(interval.to_string()));
        }
        if !self.days.is_empty() {
            actions.extend(weekday_toggles(state.weekdays(), &self.days));
        }

        let freq = self.freq.unwrap_or(state.frequency());
        let implied = self.implied_mode();
        let monthly_mode = self
            .monthly_mode
            .or(implied.filter(|_| freq == Frequency::Monthly));
        let yearly_mode = self
            .yearly_mode
            .or(implied.filter(|_| freq == Frequency::Yearly));
        if let Some(mode) = monthly_mode {
            actions.push(Action::SetMonthlyMode(mode));
        }
        if let Some(mode) = yearly_mode {
            actions.push(Action::SetYearlyMode(mode));
        }

        if let Some(month) = self.month {
            actions.push(Action::SetMonth(month.to_string()));
        }
        if let Some(day) = self.day_of_month {
            actions.push(Action::SetDayOfMonth(day.to_string()));
        }
        if let Some(week) = self.week {
            actions.push(Action::SetWeekOfMonth(week));
        }
        if let Some(weekday) = self.weekday {
            actions.push(Action::SetWeekday(weekday.into()));
        }
        if let Some(nth) = self.days_from_end {
            actions.push(Action::SetDaysFromEnd(nth.to_string()));
        }

        match self.end {
            Some(EndArg::Never) => actions.push(Action::SetEndMode(EndMode::Never)),
            Some(EndArg::Count(count)) => {
                actions.push(Action::SetEndMode(EndMode::Count));
                actions.push(Action::SetCount(count.to_string()));
            }
            Some(EndArg::Until(until)) => {
                actions.push(Action::SetEndMode(EndMode::Until));
                let until = until.format(STABLE_FORMAT_DATEONLY).to_string();
                actions.push(Action::SetUntil(until));
            }
            None => {}
        }

        actions
    }

    fn implied_mode(&self) -> Option<PatternMode> {
        if self.days_from_end.is_some() {
            Some(PatternMode::FromMonthEnd)
        } else if self.week.is_some() || self.weekday.is_some() {
            Some(PatternMode::DayOfWeek)
        } else if self.day_of_month.is_some() {
            Some(PatternMode::DayOfMonth)
        } else {
            None
        }
    }
}

/// Toggles that turn `current` into exactly `wanted`.
///
/// Additions go first, so the set never drops to empty on the way.
fn weekday_toggles(current: WeekdaySet, wanted: &[IsoWeekday]) -> Vec<Action> {
    let mut target = WeekdaySet::EMPTY;
    for day in wanted {
        target.insert(*day);
    }

    let added = target.iter().filter(|day| !current.contains(*day));
    let removed = current.iter().filter(|day| !target.contains(*day));
    added
        .chain(removed)
        .map(|day| Action::ToggleWeekday(day.into()))
        .collect()
}
