// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Anchor dates and rule factories (fixtures)
//! - An editor harness that records every published rule

#[allow(dead_code)]
mod fixtures;
#[allow(dead_code)]
mod harness;

#[allow(unused_imports)]
pub use fixtures::{anchor, date, monthly, nz, weekly, yearly};
#[allow(unused_imports)]
pub use harness::Harness;
