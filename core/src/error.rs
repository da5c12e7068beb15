// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors raised when a recurrence rule crosses a serialization boundary.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The interval is zero.
    #[error("interval must be at least 1")]
    InvalidInterval,

    /// A weekly rule has no weekdays.
    #[error("weekly rule must have at least one day of week")]
    EmptyWeekdays,

    /// A numeric field is outside its allowed range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,

        /// The rejected value.
        value: i64,
    },

    /// A field required by the rule's frequency is missing.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// Both `count` and `until` are set.
    #[error("count and until must not both be set")]
    ConflictingTermination,

    /// The frequency is not one of the supported values.
    #[error("unknown frequency '{0}'")]
    UnknownFrequency(String),

    /// An RRULE part is malformed.
    #[error("invalid rule part '{0}'")]
    InvalidPart(String),

    /// An RRULE part occurs more than once.
    #[error("duplicate rule part '{0}'")]
    DuplicatePart(String),

    /// An RRULE part is valid iCalendar but not supported here.
    #[error("unsupported rule part '{0}'")]
    UnsupportedPart(String),

    /// A date could not be parsed.
    #[error("invalid date '{0}'")]
    InvalidDate(String),
}
