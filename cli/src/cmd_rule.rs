// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, io, path::Path, path::PathBuf, rc::Rc};

use chrono::{Local, NaiveDate};
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use recur_core::{Action, Config as CoreConfig, Dispatcher, EditorStore, RecurrenceRule};
use tokio::fs;

use crate::arg::{ArgOutputFormat, CommonArgs, RuleArgs};
use crate::rule_formatter::RuleFormatter;

#[derive(Debug, Clone)]
pub struct CmdNew {
    pub date: Option<NaiveDate>,
    pub rule: RuleArgs,
    pub output_format: ArgOutputFormat,
}

impl CmdNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Build a new rule from form selections")
            .arg(CommonArgs::date())
            .args(RuleArgs::args())
            .group(RuleArgs::group())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: CommonArgs::get_date(matches),
            rule: RuleArgs::from(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, config: &CoreConfig) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "building new rule...");
        let anchor = self.date.unwrap_or_else(today);
        let rule = run_editor(anchor, None, &[], config, &self.rule);

        RuleFormatter::new(config.week_start)
            .with_output_format(self.output_format)
            .write_to(&mut io::stdout(), rule.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEdit {
    pub file: PathBuf,
    pub date: Option<NaiveDate>,
    pub rule: RuleArgs,
    pub write: bool,
    pub output_format: ArgOutputFormat,
}

impl CmdEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a rule stored as JSON")
            .arg(
                arg!(file: <FILE> "JSON file holding the rule, or null")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(CommonArgs::date())
            .args(RuleArgs::args())
            .group(RuleArgs::group())
            .arg(arg!(-w --write "Write the edited rule back to the file"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let file = match matches.get_one::<PathBuf>("file") {
            Some(file) => file.clone(),
            None => unreachable!("file is required"),
        };

        Self {
            file,
            date: CommonArgs::get_date(matches),
            rule: RuleArgs::from(matches),
            write: matches.get_flag("write"),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, config: &CoreConfig) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing rule...");
        let value = load_rule_file(&self.file).await?;

        // a stored null is a rule with repetition turned off
        let seed = match value {
            Some(_) => vec![],
            None => vec![Action::SetRepeat(false)],
        };
        let anchor = self.date.unwrap_or_else(today);
        let rule = run_editor(anchor, value.as_ref(), &seed, config, &self.rule);

        if self.write {
            let json = serde_json::to_string_pretty(&rule)?;
            fs::write(&self.file, json + "\n")
                .await
                .map_err(|e| format!("Failed to write {}: {}", self.file.display(), e))?;
            tracing::info!(path = %self.file.display(), "rule written");
        }

        RuleFormatter::new(config.week_start)
            .with_output_format(self.output_format)
            .write_to(&mut io::stdout(), rule.as_ref())
    }
}

/// Reads a rule from a JSON file, `null` meaning no rule.
pub async fn load_rule_file(path: &Path) -> Result<Option<RecurrenceRule>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let rule = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid rule in {}: {}", path.display(), e))?;
    Ok(rule)
}

/// Feeds the form actions through a dispatcher into a fresh store and returns
/// the rule it ends up publishing.
fn run_editor(
    anchor: NaiveDate,
    value: Option<&RecurrenceRule>,
    seed: &[Action],
    config: &CoreConfig,
    args: &RuleArgs,
) -> Option<RecurrenceRule> {
    let store = EditorStore::new(anchor, value, config, |rule: Option<&RecurrenceRule>| {
        match rule {
            Some(rule) => tracing::debug!(%rule, "rule changed"),
            None => tracing::debug!("rule changed, repetition off"),
        }
    });
    let store = Rc::new(RefCell::new(store));

    let mut dispatcher = Dispatcher::new();
    EditorStore::register_to(store.clone(), &mut dispatcher);

    for action in seed {
        dispatcher.dispatch(action);
    }

    let actions = args.actions(store.borrow().state());
    for action in &actions {
        dispatcher.dispatch(action);
    }

    store.borrow().output()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
