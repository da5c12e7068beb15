// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar `RRULE` text for the supported subset of rules.

use std::fmt::{self, Display};
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveDate;
use chumsky::prelude::*;

use crate::datetime::RRULE_FORMAT_DATEONLY;
use crate::error::RuleError;
use crate::rule::{
    Frequency, MonthlyPattern, Pattern, RecurrenceRule, Termination, WeekOfMonth, YearlyPattern,
};
use crate::weekday::{IsoWeekday, WeekdaySet};

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Valid iCalendar parts this model has no counterpart for.
const UNSUPPORTED: [&str; 7] = [
    "BYSECOND",
    "BYMINUTE",
    "BYHOUR",
    "BYYEARDAY",
    "BYWEEKNO",
    "BYSETPOS",
    "RSCALE",
];

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={};INTERVAL={}", self.frequency(), self.interval())?;

        match *self.pattern() {
            Pattern::Daily => {}
            Pattern::Weekly(days) => {
                f.write_str(";BYDAY=")?;
                for (i, day) in days.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{day}")?;
                }
            }
            Pattern::Monthly(MonthlyPattern::DayOfMonth { day }) => {
                write!(f, ";BYMONTHDAY={day}")?;
            }
            Pattern::Monthly(MonthlyPattern::DayOfWeek { weekday, week }) => {
                write!(f, ";BYDAY={}{weekday}", week.ordinal())?;
            }
            Pattern::Monthly(MonthlyPattern::FromMonthEnd { nth }) => {
                write!(f, ";BYMONTHDAY=-{nth}")?;
            }
            Pattern::Yearly(YearlyPattern::Date { month, day }) => {
                write!(f, ";BYMONTH={month};BYMONTHDAY={day}")?;
            }
            Pattern::Yearly(YearlyPattern::DayOfWeek {
                month,
                weekday,
                week,
            }) => {
                write!(f, ";BYMONTH={month};BYDAY={}{weekday}", week.ordinal())?;
            }
            Pattern::Yearly(YearlyPattern::FromMonthEnd { month, nth }) => {
                write!(f, ";BYMONTH={month};BYMONTHDAY=-{nth}")?;
            }
        }

        match self.end() {
            Termination::Never => Ok(()),
            Termination::Count(count) => write!(f, ";COUNT={count}"),
            Termination::Until(until) => {
                write!(f, ";UNTIL={}", until.format(RRULE_FORMAT_DATEONLY))
            }
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = RuleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let raw = rule_parts()
            .parse(value)
            .into_result()
            .map_err(|errs| invalid_part_at(value, &errs))?;
        let parts = Parts::collect(raw)?;
        tracing::trace!(?parts, "parsed rrule parts");

        let freq: Frequency = parts.freq.ok_or(RuleError::MissingField("FREQ"))?.parse()?;

        let interval = match parts.interval {
            Some(v) => NonZeroU32::new(parse_number("INTERVAL", v)?)
                .ok_or(RuleError::InvalidInterval)?,
            None => NonZeroU32::MIN,
        };

        // Weekly periods are aligned to Monday, other week starts only matter past interval 1.
        if let Some(v) = parts.wkst {
            let wkst = parse_value(weekday(), v)
                .ok_or_else(|| RuleError::InvalidPart(format!("WKST={v}")))?;
            if wkst != IsoWeekday::Monday && freq == Frequency::Weekly && interval.get() > 1 {
                return Err(RuleError::UnsupportedPart(format!("WKST={v}")));
            }
        }

        let end = match (parts.count, parts.until) {
            (Some(_), Some(_)) => return Err(RuleError::ConflictingTermination),
            (Some(v), None) => match NonZeroU32::new(parse_number("COUNT", v)?) {
                Some(count) => Termination::Count(count),
                None => return Err(RuleError::OutOfRange { field: "COUNT", value: 0 }),
            },
            (None, Some(v)) => Termination::Until(
                parse_value(until_date(), v).ok_or_else(|| RuleError::InvalidDate(v.to_string()))?,
            ),
            (None, None) => Termination::Never,
        };

        let pattern = match freq {
            Frequency::Daily => {
                parts.reject_by_parts()?;
                Pattern::Daily
            }
            Frequency::Weekly => {
                if let Some(v) = parts.bymonthday {
                    return Err(RuleError::UnsupportedPart(format!("BYMONTHDAY={v}")));
                }
                if let Some(v) = parts.bymonth {
                    return Err(RuleError::UnsupportedPart(format!("BYMONTH={v}")));
                }
                let byday = parts.byday.ok_or(RuleError::MissingField("BYDAY"))?;
                Pattern::Weekly(parse_weekdays(byday)?)
            }
            Frequency::Monthly => {
                if let Some(v) = parts.bymonth {
                    return Err(RuleError::UnsupportedPart(format!("BYMONTH={v}")));
                }
                Pattern::Monthly(match parts.position()? {
                    Position::Day(day) => MonthlyPattern::DayOfMonth { day },
                    Position::Weekday(weekday, week) => MonthlyPattern::DayOfWeek { weekday, week },
                    Position::FromEnd(nth) => MonthlyPattern::FromMonthEnd { nth },
                })
            }
            Frequency::Yearly => {
                let month = parts.bymonth.ok_or(RuleError::MissingField("BYMONTH"))?;
                let month = narrow("BYMONTH", parse_single("BYMONTH", month)?)?;
                Pattern::Yearly(match parts.position()? {
                    Position::Day(day) => YearlyPattern::Date { month, day },
                    Position::Weekday(weekday, week) => YearlyPattern::DayOfWeek {
                        month,
                        weekday,
                        week,
                    },
                    Position::FromEnd(nth) => YearlyPattern::FromMonthEnd { month, nth },
                })
            }
        };

        RecurrenceRule::new(interval, pattern, end)
    }
}

/// Raw values of the recognized parts, each seen at most once.
#[derive(Debug, Default)]
struct Parts<'a> {
    freq: Option<&'a str>,
    interval: Option<&'a str>,
    byday: Option<&'a str>,
    bymonthday: Option<&'a str>,
    bymonth: Option<&'a str>,
    count: Option<&'a str>,
    until: Option<&'a str>,
    wkst: Option<&'a str>,
}

impl<'a> Parts<'a> {
    fn collect(raw: Vec<(&'a str, &'a str)>) -> Result<Self, RuleError> {
        let mut parts = Parts::default();
        for (name, v) in raw {
            let key = name.to_ascii_uppercase();
            let slot = match key.as_str() {
                "FREQ" => &mut parts.freq,
                "INTERVAL" => &mut parts.interval,
                "BYDAY" => &mut parts.byday,
                "BYMONTHDAY" => &mut parts.bymonthday,
                "BYMONTH" => &mut parts.bymonth,
                "COUNT" => &mut parts.count,
                "UNTIL" => &mut parts.until,
                "WKST" => &mut parts.wkst,
                k if UNSUPPORTED.contains(&k) => return Err(RuleError::UnsupportedPart(k.to_string())),
                _ => return Err(RuleError::InvalidPart(format!("{name}={v}"))),
            };
            if slot.replace(v).is_some() {
                return Err(RuleError::DuplicatePart(key));
            }
        }
        Ok(parts)
    }

    fn reject_by_parts(&self) -> Result<(), RuleError> {
        let by = [
            ("BYDAY", self.byday),
            ("BYMONTHDAY", self.bymonthday),
            ("BYMONTH", self.bymonth),
        ];
        match by.into_iter().find_map(|(k, v)| v.map(|v| (k, v))) {
            Some((k, v)) => Err(RuleError::UnsupportedPart(format!("{k}={v}"))),
            None => Ok(()),
        }
    }

    /// The single day position a monthly or yearly rule lands on.
    fn position(&self) -> Result<Position, RuleError> {
        match (self.byday, self.bymonthday) {
            (Some(byday), None) => {
                let items = parse_value(weekday_list(), byday)
                    .ok_or_else(|| RuleError::InvalidPart(format!("BYDAY={byday}")))?;
                let (ordinal, weekday) = match items.as_slice() {
                    [item] => *item,
                    _ => return Err(RuleError::UnsupportedPart(format!("BYDAY={byday}"))),
                };
                let n = ordinal.ok_or_else(|| RuleError::InvalidPart(format!("BYDAY={byday}")))?;
                let week = WeekOfMonth::from_ordinal(n).ok_or(RuleError::OutOfRange {
                    field: "BYDAY",
                    value: n.into(),
                })?;
                Ok(Position::Weekday(weekday, week))
            }
            (None, Some(v)) => match parse_single("BYMONTHDAY", v)? {
                0 => Err(RuleError::OutOfRange {
                    field: "BYMONTHDAY",
                    value: 0,
                }),
                day if day < 0 => Ok(Position::FromEnd(narrow("BYMONTHDAY", day.saturating_neg())?)),
                day => Ok(Position::Day(narrow("BYMONTHDAY", day)?)),
            },
            (Some(byday), Some(_)) => Err(RuleError::UnsupportedPart(format!("BYDAY={byday}"))),
            (None, None) => Err(RuleError::MissingField("BYMONTHDAY")),
        }
    }
}

enum Position {
    Day(u8),
    Weekday(IsoWeekday, WeekOfMonth),
    FromEnd(u8),
}

/// The `;`-separated part holding the first syntax error.
fn invalid_part_at(value: &str, errs: &[Rich<'_, char>]) -> RuleError {
    tracing::debug!(value, ?errs, "malformed rrule");
    let pos = errs.first().map_or(0, |e| e.span().start);
    let (head, tail) = value.split_at_checked(pos).unwrap_or((value, ""));
    let start = head.rfind(';').map_or(0, |i| i + 1);
    let stop = tail.find(';').map_or(value.len(), |i| pos + i);
    RuleError::InvalidPart(value[start..stop].trim().to_string())
}

/// Runs `parser` over a whole part value.
fn parse_value<'src, T>(
    parser: impl Parser<'src, &'src str, T, Extra<'src>>,
    value: &'src str,
) -> Option<T> {
    parser
        .then_ignore(end())
        .parse(value)
        .into_result()
        .map_err(|errs| tracing::debug!(value, ?errs, "malformed rrule part value"))
        .ok()
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, RuleError> {
    parse_value(number(), value).ok_or_else(|| RuleError::InvalidPart(format!("{field}={value}")))
}

/// A one-item `[+/-]N` list, lists of several positions have no counterpart in the model.
fn parse_single(field: &'static str, value: &str) -> Result<i64, RuleError> {
    let items = parse_value(signed().separated_by(just(',')).at_least(1).collect::<Vec<_>>(), value)
        .ok_or_else(|| RuleError::InvalidPart(format!("{field}={value}")))?;
    match items.as_slice() {
        [n] => Ok(*n),
        _ => Err(RuleError::UnsupportedPart(format!("{field}={value}"))),
    }
}

fn narrow(field: &'static str, value: i64) -> Result<u8, RuleError> {
    u8::try_from(value).map_err(|_| RuleError::OutOfRange { field, value })
}

fn parse_weekdays(value: &str) -> Result<WeekdaySet, RuleError> {
    let items = parse_value(weekday_list(), value)
        .ok_or_else(|| RuleError::InvalidPart(format!("BYDAY={value}")))?;
    items
        .into_iter()
        .map(|item| match item {
            (None, day) => Ok(day),
            (Some(_), _) => Err(RuleError::UnsupportedPart(format!("BYDAY={value}"))),
        })
        .collect()
}

/// ```txt
/// recur      = ["RRULE:"] part *( ";" part ) [";"]
/// part       = name "=" *( any char but ";" )
/// ```
fn rule_parts<'src>()
-> impl Parser<'src, &'src str, Vec<(&'src str, &'src str)>, Extra<'src>> {
    let name = any()
        .filter(char::is_ascii_alphabetic)
        .repeated()
        .at_least(1)
        .to_slice();
    let prefix = name
        .clone()
        .filter(|name: &&str| name.eq_ignore_ascii_case("RRULE"))
        .then_ignore(just(':'));
    let value = none_of(";").repeated().to_slice().map(str::trim);
    let part = name.then_ignore(just('=')).then(value);

    prefix
        .or_not()
        .ignore_then(
            part.padded()
                .separated_by(just(';'))
                .allow_trailing()
                .at_least(1)
                .collect(),
        )
        .padded()
        .then_ignore(end())
}

fn digits<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    any()
        .filter(char::is_ascii_digit)
        .repeated()
        .at_least(1)
        .to_slice()
}

/// `1*DIGIT`
fn number<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> {
    digits().try_map(|s: &str, span| s.parse().map_err(|e| Rich::custom(span, e)))
}

/// `[plus / minus] 1*DIGIT`
fn signed<'src>() -> impl Parser<'src, &'src str, i64, Extra<'src>> + Clone {
    one_of("+-")
        .or_not()
        .then(digits())
        .to_slice()
        .try_map(|s: &str, span| s.parse().map_err(|e| Rich::custom(span, e)))
}

/// `"SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"`, in any case.
fn weekday<'src>() -> impl Parser<'src, &'src str, IsoWeekday, Extra<'src>> + Clone {
    any()
        .filter(char::is_ascii_alphabetic)
        .repeated()
        .exactly(2)
        .to_slice()
        .try_map(|code: &str, span| {
            code.parse()
                .map_err(|()| Rich::custom(span, format!("unknown weekday '{code}'")))
        })
}

/// `weekdaynum *("," weekdaynum)` where `weekdaynum = [[plus / minus] ordwk] weekday`.
fn weekday_list<'src>()
-> impl Parser<'src, &'src str, Vec<(Option<i8>, IsoWeekday)>, Extra<'src>> {
    let ordinal = one_of("+-")
        .or_not()
        .then(digits())
        .to_slice()
        .try_map(|s: &str, span| s.parse::<i8>().map_err(|e| Rich::custom(span, e)));

    ordinal
        .or_not()
        .then(weekday())
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// `date [ "T" time [ "Z" ] ]`, keeping only the date.
fn until_date<'src>() -> impl Parser<'src, &'src str, NaiveDate, Extra<'src>> {
    let digit = any().filter(char::is_ascii_digit);
    let time = just('T')
        .then(digit.clone().repeated().exactly(6))
        .then(just('Z').or_not());

    digit
        .repeated()
        .exactly(8)
        .to_slice()
        .then_ignore(time.or_not())
        .try_map(|date: &str, span| {
            NaiveDate::parse_from_str(date, RRULE_FORMAT_DATEONLY).map_err(|e| Rich::custom(span, e))
        })
}
