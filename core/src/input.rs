// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lenient parsing of form text.
//!
//! Text fields never fail: malformed numbers coerce to a default and dates fall
//! back to an offset from the anchor date.

use chrono::NaiveDate;

use crate::datetime::{add_days, parse_date};

/// Reads the leading integer of `input`, like `parseInt`.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Returns `None` when there are no digits.
pub fn leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

/// `parseInt(input) || default`: missing or zero values become `default`.
pub fn int_or(input: &str, default: i64) -> i64 {
    match leading_int(input) {
        Some(0) | None => default,
        Some(n) => n,
    }
}

/// Coerces `input` into `min..=max`, with missing or zero values becoming `default`.
pub fn clamped_int(input: &str, default: i64, min: i64, max: i64) -> i64 {
    int_or(input, default).clamp(min, max)
}

/// Parses a date, falling back to `fallback_days` after `anchor`.
pub fn date_or(input: &str, anchor: NaiveDate, fallback_days: u32) -> NaiveDate {
    match parse_date(input) {
        Some(date) => date,
        None => {
            tracing::debug!(input, fallback_days, "unparseable date, using fallback");
            add_days(anchor, fallback_days)
        }
    }
}
