// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Rule model integration tests: stored JSON, RRULE text, occurrences and
//! weekday numbering.

mod json;
mod occurrences;
mod rrule;
mod weekday;
