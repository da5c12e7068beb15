// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Weekday numbering.
//!
//! The model uses ISO numbering (Monday = 1 .. Sunday = 7). Weekday buttons in a
//! user interface are indexed 0..=6 starting on Sunday. The two conventions only
//! meet through [`js_index_to_iso_day`] and [`iso_day_to_js_index`], or the typed
//! [`WeekdayButton`] conversions built on them.

use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

/// Converts a Sunday-first UI index (0..=6) to an ISO day number (1..=7).
pub const fn js_index_to_iso_day(index: u8) -> Option<u8> {
    match index {
        0 => Some(7),
        1..=6 => Some(index),
        _ => None,
    }
}

/// Converts an ISO day number (1..=7) to a Sunday-first UI index (0..=6).
pub const fn iso_day_to_js_index(day: u8) -> Option<u8> {
    match day {
        7 => Some(0),
        1..=6 => Some(day),
        _ => None,
    }
}

/// Day of the week, in ISO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum IsoWeekday {
    /// Monday, ISO day 1.
    #[cfg_attr(feature = "clap", clap(name = "mo", alias = "monday"))]
    Monday = 1,

    /// Tuesday, ISO day 2.
    #[cfg_attr(feature = "clap", clap(name = "tu", alias = "tuesday"))]
    Tuesday = 2,

    /// Wednesday, ISO day 3.
    #[cfg_attr(feature = "clap", clap(name = "we", alias = "wednesday"))]
    Wednesday = 3,

    /// Thursday, ISO day 4.
    #[cfg_attr(feature = "clap", clap(name = "th", alias = "thursday"))]
    Thursday = 4,

    /// Friday, ISO day 5.
    #[cfg_attr(feature = "clap", clap(name = "fr", alias = "friday"))]
    Friday = 5,

    /// Saturday, ISO day 6.
    #[cfg_attr(feature = "clap", clap(name = "sa", alias = "saturday"))]
    Saturday = 6,

    /// Sunday, ISO day 7.
    #[cfg_attr(feature = "clap", clap(name = "su", alias = "sunday"))]
    Sunday = 7,
}

const DAY_MO: &str = "MO";
const DAY_TU: &str = "TU";
const DAY_WE: &str = "WE";
const DAY_TH: &str = "TH";
const DAY_FR: &str = "FR";
const DAY_SA: &str = "SA";
const DAY_SU: &str = "SU";

impl IsoWeekday {
    /// All weekdays, Monday first.
    pub const ALL: [IsoWeekday; 7] = [
        IsoWeekday::Monday,
        IsoWeekday::Tuesday,
        IsoWeekday::Wednesday,
        IsoWeekday::Thursday,
        IsoWeekday::Friday,
        IsoWeekday::Saturday,
        IsoWeekday::Sunday,
    ];

    /// The ISO day number, 1..=7.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Looks up a weekday by its ISO day number.
    pub const fn from_number(day: u8) -> Option<Self> {
        match day {
            1 => Some(IsoWeekday::Monday),
            2 => Some(IsoWeekday::Tuesday),
            3 => Some(IsoWeekday::Wednesday),
            4 => Some(IsoWeekday::Thursday),
            5 => Some(IsoWeekday::Friday),
            6 => Some(IsoWeekday::Saturday),
            7 => Some(IsoWeekday::Sunday),
            _ => None,
        }
    }

    /// The weekday the given date falls on.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Full English name.
    pub const fn name(self) -> &'static str {
        match self {
            IsoWeekday::Monday => "Monday",
            IsoWeekday::Tuesday => "Tuesday",
            IsoWeekday::Wednesday => "Wednesday",
            IsoWeekday::Thursday => "Thursday",
            IsoWeekday::Friday => "Friday",
            IsoWeekday::Saturday => "Saturday",
            IsoWeekday::Sunday => "Sunday",
        }
    }
}

impl AsRef<str> for IsoWeekday {
    fn as_ref(&self) -> &str {
        match self {
            IsoWeekday::Monday => DAY_MO,
            IsoWeekday::Tuesday => DAY_TU,
            IsoWeekday::Wednesday => DAY_WE,
            IsoWeekday::Thursday => DAY_TH,
            IsoWeekday::Friday => DAY_FR,
            IsoWeekday::Saturday => DAY_SA,
            IsoWeekday::Sunday => DAY_SU,
        }
    }
}

impl Display for IsoWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for IsoWeekday {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            DAY_MO => Ok(IsoWeekday::Monday),
            DAY_TU => Ok(IsoWeekday::Tuesday),
            DAY_WE => Ok(IsoWeekday::Wednesday),
            DAY_TH => Ok(IsoWeekday::Thursday),
            DAY_FR => Ok(IsoWeekday::Friday),
            DAY_SA => Ok(IsoWeekday::Saturday),
            DAY_SU => Ok(IsoWeekday::Sunday),
            _ => Err(()),
        }
    }
}

impl From<Weekday> for IsoWeekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => IsoWeekday::Monday,
            Weekday::Tue => IsoWeekday::Tuesday,
            Weekday::Wed => IsoWeekday::Wednesday,
            Weekday::Thu => IsoWeekday::Thursday,
            Weekday::Fri => IsoWeekday::Friday,
            Weekday::Sat => IsoWeekday::Saturday,
            Weekday::Sun => IsoWeekday::Sunday,
        }
    }
}

impl From<IsoWeekday> for Weekday {
    fn from(day: IsoWeekday) -> Self {
        match day {
            IsoWeekday::Monday => Weekday::Mon,
            IsoWeekday::Tuesday => Weekday::Tue,
            IsoWeekday::Wednesday => Weekday::Wed,
            IsoWeekday::Thursday => Weekday::Thu,
            IsoWeekday::Friday => Weekday::Fri,
            IsoWeekday::Saturday => Weekday::Sat,
            IsoWeekday::Sunday => Weekday::Sun,
        }
    }
}

/// A weekday button as the user interface indexes it: 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayButton(u8);

impl WeekdayButton {
    /// Creates a button index, `None` if it is not in 0..=6.
    pub const fn new(index: u8) -> Option<Self> {
        match index {
            0..=6 => Some(Self(index)),
            _ => None,
        }
    }

    /// The raw 0..=6 index.
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl From<WeekdayButton> for IsoWeekday {
    fn from(button: WeekdayButton) -> Self {
        match js_index_to_iso_day(button.0).and_then(IsoWeekday::from_number) {
            Some(day) => day,
            None => unreachable!("button index is always in 0..=6"),
        }
    }
}

impl From<IsoWeekday> for WeekdayButton {
    fn from(day: IsoWeekday) -> Self {
        match iso_day_to_js_index(day.number()) {
            Some(index) => Self(index),
            None => unreachable!("ISO day is always in 1..=7"),
        }
    }
}

/// The day a week starts on when weekday buttons are laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum WeekStart {
    /// Sunday first, the layout of the weekday buttons.
    #[default]
    Sunday,

    /// Monday first, ISO order.
    Monday,
}

impl WeekStart {
    /// Weekday buttons in display order.
    pub fn buttons(self) -> impl Iterator<Item = WeekdayButton> {
        let offset = match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        };
        (0..7u8).map(move |i| WeekdayButton((i + offset) % 7))
    }
}

/// A set of weekdays. Iterates in ISO order and never holds duplicates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// A set holding one day.
    pub const fn single(day: IsoWeekday) -> Self {
        Self(1 << (day as u8 - 1))
    }

    /// Whether the day is in the set.
    pub const fn contains(self, day: IsoWeekday) -> bool {
        self.0 & (1 << (day as u8 - 1)) != 0
    }

    /// Adds a day, returning `false` if it was already present.
    pub fn insert(&mut self, day: IsoWeekday) -> bool {
        let had = self.contains(day);
        self.0 |= 1 << (day as u8 - 1);
        !had
    }

    /// Removes a day, returning `false` if it was absent.
    pub fn remove(&mut self, day: IsoWeekday) -> bool {
        let had = self.contains(day);
        self.0 &= !(1 << (day as u8 - 1));
        had
    }

    /// Whether the set has no days.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of days in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in ascending ISO order.
    pub fn iter(self) -> impl Iterator<Item = IsoWeekday> {
        IsoWeekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    /// ISO numbers in ascending order.
    pub fn numbers(self) -> Vec<u8> {
        self.iter().map(IsoWeekday::number).collect()
    }
}

impl FromIterator<IsoWeekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = IsoWeekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}
