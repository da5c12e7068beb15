// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Editor integration tests.
//!
//! Covers rule generation, seeding from an existing rule and the
//! publish-on-change contract of the store.

mod end_mode;
mod generate;
mod round_trip;
mod store;
