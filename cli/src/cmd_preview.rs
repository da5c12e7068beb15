// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::Path};

use chrono::{Local, NaiveDate};
use clap::{ArgMatches, Command, arg};
use clap_num::number_range;
use recur_core::RecurrenceRule;

use crate::arg::{ArgOutputFormat, CommonArgs};
use crate::cmd_rule::load_rule_file;
use crate::config::Config;
use crate::rule_formatter::OccurrenceFormatter;

#[derive(Debug, Clone)]
pub struct CmdPreview {
    pub rule: String,
    pub date: Option<NaiveDate>,
    pub limit: Option<usize>,
    pub output_format: ArgOutputFormat,
}

impl CmdPreview {
    pub const NAME: &str = "preview";

    pub fn command() -> Command {
        fn from_1_to_1000(s: &str) -> Result<usize, String> {
            number_range(s, 1, 1000)
        }

        Command::new(Self::NAME)
            .about("List the dates a rule produces")
            .arg(arg!(rule: <RULE> "A JSON file, inline JSON, or RRULE text"))
            .arg(CommonArgs::date().help("First date to consider, YYYY-MM-DD (default: today)"))
            .arg(arg!(-n --limit <N> "Maximum number of dates to list").value_parser(from_1_to_1000))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let rule = match matches.get_one::<String>("rule") {
            Some(rule) => rule.clone(),
            None => unreachable!("rule is required"),
        };

        Self {
            rule,
            date: CommonArgs::get_date(matches),
            limit: matches.get_one("limit").copied(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "previewing rule...");
        let rule = load_rule(&self.rule).await?;
        let start = self.date.unwrap_or_else(|| Local::now().date_naive());
        let limit = self.limit.unwrap_or(config.preview_limit);

        let dates: Vec<_> = rule.occurrences(start).take(limit).collect();
        if dates.len() < limit {
            tracing::info!(found = dates.len(), limit, "rule ends before the limit");
        }

        OccurrenceFormatter::new()
            .with_output_format(self.output_format)
            .write_to(&mut io::stdout(), &rule, &dates)
    }
}

/// Accepts inline JSON, a path to a JSON file, or RRULE text, in that order.
async fn load_rule(input: &str) -> Result<RecurrenceRule, Box<dyn Error>> {
    let input = input.trim();
    let rule = if input.starts_with('{') {
        Some(serde_json::from_str(input)?)
    } else if Path::new(input).is_file() {
        load_rule_file(Path::new(input)).await?
    } else {
        Some(input.parse()?)
    };
    rule.ok_or_else(|| "The rule does not repeat, nothing to preview".into())
}
