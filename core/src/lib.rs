// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rules: the typed model, a form editor that builds rules from
//! discrete selections, and the JSON and RRULE text forms.

mod config;
mod datetime;
mod describe;
mod dispatcher;
mod editor;
mod error;
mod expand;
mod input;
mod repr;
mod rrule;
mod rule;
mod store;
mod weekday;

pub use crate::config::{APP_NAME, Config};
pub use crate::datetime::{STABLE_FORMAT_DATEONLY, parse_date};
pub use crate::dispatcher::{Action, Dispatcher};
pub use crate::editor::{EditorState, EndMode, generate_rule};
pub use crate::error::RuleError;
pub use crate::expand::Occurrences;
pub use crate::input::leading_int;
pub use crate::rule::{
    Frequency, MonthlyPattern, Pattern, PatternMode, RecurrenceRule, Termination, WeekOfMonth,
    YearlyPattern,
};
pub use crate::store::EditorStore;
pub use crate::weekday::{
    IsoWeekday, WeekStart, WeekdayButton, WeekdaySet, iso_day_to_js_index, js_index_to_iso_day,
};
