// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use chrono::{Datelike, NaiveDate, Weekday};
use colored::Color;
use recur_core::{
    IsoWeekday, Pattern, RecurrenceRule, STABLE_FORMAT_DATEONLY, Termination, WeekStart,
    WeekdaySet,
};

use crate::arg::ArgOutputFormat;
use crate::table::{Column, PaddingDirection, Table};

/// Renders the rule the editor produced.
#[derive(Debug, Clone, Copy)]
pub struct RuleFormatter {
    week_start: WeekStart,
    output_format: ArgOutputFormat,
}

impl RuleFormatter {
    pub fn new(week_start: WeekStart) -> Self {
        Self {
            week_start,
            output_format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, output_format: ArgOutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn write_to(
        &self,
        w: &mut impl io::Write,
        rule: Option<&RecurrenceRule>,
    ) -> Result<(), Box<dyn Error>> {
        match self.output_format {
            ArgOutputFormat::Json => writeln!(w, "{}", serde_json::to_string_pretty(&rule)?)?,
            ArgOutputFormat::Rrule => match rule {
                Some(rule) => writeln!(w, "RRULE:{rule}")?,
                None => tracing::warn!("the rule does not repeat, nothing to print"),
            },
            ArgOutputFormat::Table => {
                let fields = self.fields(rule);
                let columns = [FieldColumn::Name, FieldColumn::Value];
                Table::new(&columns, &fields).write_to(w)?;
            }
        }
        Ok(())
    }

    fn fields(&self, rule: Option<&RecurrenceRule>) -> Vec<Field> {
        let Some(rule) = rule else {
            return vec![Field::new("repeat", "does not repeat".to_string())];
        };

        let mut fields = vec![
            Field::new("frequency", rule.frequency().to_string()),
            Field::new("interval", rule.interval().to_string()),
        ];
        if let Pattern::Weekly(days) = rule.pattern() {
            fields.push(Field::new("days", weekday_buttons(*days, self.week_start)));
        }
        let ends = match rule.end() {
            Termination::Never => "never".to_string(),
            Termination::Count(n) if n.get() == 1 => "after 1 occurrence".to_string(),
            Termination::Count(n) => format!("after {n} occurrences"),
            Termination::Until(date) => format!("on {}", date.format(STABLE_FORMAT_DATEONLY)),
        };
        fields.push(Field::new("ends", ends));
        fields.push(Field::new("summary", rule.describe()));
        fields.push(Field::new("rrule", rule.to_string()));
        fields
    }
}

/// The weekday buttons in display order, selected ones in brackets.
fn weekday_buttons(days: WeekdaySet, week_start: WeekStart) -> String {
    week_start
        .buttons()
        .map(|button| {
            let day = IsoWeekday::from(button);
            let label = &day.name()[..2];
            if days.contains(day) {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

#[derive(Debug, Clone)]
struct Field {
    name: &'static str,
    value: String,
}

impl Field {
    fn new(name: &'static str, value: String) -> Self {
        Self { name, value }
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldColumn {
    Name,
    Value,
}

impl Column<Field> for FieldColumn {
    fn format(&self, data: &Field) -> String {
        match self {
            FieldColumn::Name => data.name.to_string(),
            FieldColumn::Value => data.value.clone(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &Field) -> Option<Color> {
        match self {
            FieldColumn::Name => Some(Color::Cyan),
            FieldColumn::Value => None,
        }
    }
}

/// Renders the dates a rule expands to.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceFormatter {
    output_format: ArgOutputFormat,
}

impl OccurrenceFormatter {
    pub fn new() -> Self {
        Self {
            output_format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, output_format: ArgOutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn write_to(
        &self,
        w: &mut impl io::Write,
        rule: &RecurrenceRule,
        dates: &[NaiveDate],
    ) -> Result<(), Box<dyn Error>> {
        match self.output_format {
            ArgOutputFormat::Json => writeln!(w, "{}", serde_json::to_string_pretty(dates)?)?,
            ArgOutputFormat::Rrule => {
                if let Some(first) = dates.first() {
                    writeln!(w, "DTSTART;VALUE=DATE:{}", first.format("%Y%m%d"))?;
                }
                writeln!(w, "RRULE:{rule}")?;
            }
            ArgOutputFormat::Table => {
                let rows: Vec<_> = dates.iter().copied().enumerate().collect();
                let columns = [
                    OccurrenceColumn::Index,
                    OccurrenceColumn::Date,
                    OccurrenceColumn::Weekday,
                ];
                Table::new(&columns, &rows).write_to(w)?;
            }
        }
        Ok(())
    }
}

impl Default for OccurrenceFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum OccurrenceColumn {
    Index,
    Date,
    Weekday,
}

impl Column<(usize, NaiveDate)> for OccurrenceColumn {
    fn format(&self, data: &(usize, NaiveDate)) -> String {
        let (i, date) = data;
        match self {
            OccurrenceColumn::Index => format!("#{}", i + 1),
            OccurrenceColumn::Date => date.format(STABLE_FORMAT_DATEONLY).to_string(),
            OccurrenceColumn::Weekday => IsoWeekday::of(*date).name().to_string(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            OccurrenceColumn::Index => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &(usize, NaiveDate)) -> Option<Color> {
        match (self, data.1.weekday()) {
            (OccurrenceColumn::Index, _) => Some(Color::BrightBlack),
            (OccurrenceColumn::Weekday, Weekday::Sat | Weekday::Sun) => Some(Color::Yellow),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use recur_core::{MonthlyPattern, WeekOfMonth};

    use super::*;

    fn render(formatter: RuleFormatter, rule: Option<&RecurrenceRule>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        formatter.write_to(&mut out, rule).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn weekly() -> RecurrenceRule {
        let mut days = WeekdaySet::EMPTY;
        days.insert(IsoWeekday::Monday);
        days.insert(IsoWeekday::Wednesday);
        RecurrenceRule::new(NonZeroU32::new(2).unwrap(), Pattern::Weekly(days), Termination::Never)
            .unwrap()
    }

    #[test]
    fn test_weekday_buttons_follow_week_start() {
        let rule = weekly();
        let Pattern::Weekly(days) = rule.pattern() else {
            unreachable!()
        };
        assert_eq!(
            weekday_buttons(*days, WeekStart::Sunday),
            " Su [Mo] Tu [We] Th  Fr  Sa "
        );
        assert_eq!(
            weekday_buttons(*days, WeekStart::Monday),
            "[Mo] Tu [We] Th  Fr  Sa  Su "
        );
    }

    #[test]
    fn test_table_output() {
        let out = render(RuleFormatter::new(WeekStart::Monday), Some(&weekly()));
        assert!(out.contains("frequency  WEEKLY\n"));
        assert!(out.contains("interval   2\n"));
        assert!(out.contains("summary    every 2 weeks on Monday, Wednesday\n"));
        assert!(out.contains("rrule      FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE\n"));
    }

    #[test]
    fn test_json_and_rrule_output() {
        let rule = RecurrenceRule::new(
            NonZeroU32::MIN,
            Pattern::Monthly(MonthlyPattern::DayOfWeek {
                weekday: IsoWeekday::Friday,
                week: WeekOfMonth::Last,
            }),
            Termination::Count(NonZeroU32::new(3).unwrap()),
        )
        .unwrap();

        let formatter = RuleFormatter::new(WeekStart::Sunday);
        let json = render(formatter.with_output_format(ArgOutputFormat::Json), Some(&rule));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "MONTHLY");
        assert_eq!(value["count"], 3);

        let rrule = render(formatter.with_output_format(ArgOutputFormat::Rrule), Some(&rule));
        assert_eq!(rrule, "RRULE:FREQ=MONTHLY;INTERVAL=1;BYDAY=-1FR;COUNT=3\n");
    }

    #[test]
    fn test_no_repeat_output() {
        let formatter = RuleFormatter::new(WeekStart::Sunday);
        let json = render(formatter.with_output_format(ArgOutputFormat::Json), None);
        assert_eq!(json, "null\n");
        assert!(render(formatter, None).contains("does not repeat"));
    }

    #[test]
    fn test_occurrence_table() {
        colored::control::set_override(false);
        let dates = [
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
        ];
        let mut out = Vec::new();
        OccurrenceFormatter::new()
            .write_to(&mut out, &RecurrenceRule::daily(), &dates)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#1  2024-03-15  Friday\n#2  2024-03-16  Saturday\n"
        );
    }
}
