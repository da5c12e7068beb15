// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front-end for building, editing and previewing recurrence rules.

mod arg;
mod cli;
mod cmd_generate_completion;
mod cmd_preview;
mod cmd_rule;
mod config;
mod rule_formatter;
mod table;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
