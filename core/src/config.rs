// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use crate::weekday::WeekStart;

/// The name of the application.
pub const APP_NAME: &str = "recur";

/// Configuration for the rule editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// The day weekday buttons start on.
    pub week_start: WeekStart,

    /// Occurrence count offered when a rule is switched to end after a count.
    pub default_count: NonZeroU32,

    /// Days after the anchor date used for a new or unparseable until date.
    pub default_until_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            default_count: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            default_until_days: 90,
        }
    }
}
