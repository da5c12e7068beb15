// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Weekday numbering between form buttons and the model.

use recur_core::{IsoWeekday, WeekdayButton, iso_day_to_js_index, js_index_to_iso_day};

#[test]
fn js_index_translation_is_a_bijection() {
    for x in 0..=6 {
        assert_eq!(js_index_to_iso_day(x).and_then(iso_day_to_js_index), Some(x));
    }
    for x in 1..=7 {
        assert_eq!(iso_day_to_js_index(x).and_then(js_index_to_iso_day), Some(x));
    }
}

#[test]
fn buttons_map_to_iso_days() {
    let iso: Vec<_> = (0..=6)
        .map(|i| IsoWeekday::from(WeekdayButton::new(i).unwrap()).number())
        .collect();
    assert_eq!(iso, vec![7, 1, 2, 3, 4, 5, 6]);
}
