// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End condition selection.

use recur_core::{Action, Config, EndMode, Frequency, Termination};

use crate::common::{Harness, anchor, date, nz};

#[test]
fn count_then_until_clears_count() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetEndMode(EndMode::Count))
        .dispatch(Action::SetCount("5".to_string()));
    assert_eq!(h.rule().end(), Termination::Count(nz(5)));

    h.dispatch(Action::SetEndMode(EndMode::Until));
    let rule = h.rule();
    assert_eq!(rule.count(), None);
    assert_eq!(rule.until(), Some(date(2024, 6, 13)));
}

#[test]
fn never_clears_both() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetEndMode(EndMode::Until))
        .dispatch(Action::SetUntil("2024-12-31".to_string()))
        .dispatch(Action::SetEndMode(EndMode::Never));

    let rule = h.rule();
    assert_eq!(rule.count(), None);
    assert_eq!(rule.until(), None);
}

#[test]
fn inputs_survive_mode_switches() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetEndMode(EndMode::Count))
        .dispatch(Action::SetCount("7".to_string()))
        .dispatch(Action::SetEndMode(EndMode::Never))
        .dispatch(Action::SetEndMode(EndMode::Count));
    assert_eq!(h.rule().count(), Some(nz(7)));
}

#[test]
fn count_default_comes_from_config() {
    let config = Config {
        default_count: nz(4),
        default_until_days: 7,
        ..Config::default()
    };
    let mut h = Harness::with_config(anchor(), None, &config);
    h.dispatch(Action::SetEndMode(EndMode::Count));
    assert_eq!(h.rule().count(), Some(nz(4)));

    h.dispatch(Action::SetEndMode(EndMode::Until));
    assert_eq!(h.rule().until(), Some(date(2024, 3, 22)));
}

#[test]
fn every_end_mode_sets_at_most_one_termination() {
    let frequencies = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];
    let modes = [EndMode::Never, EndMode::Count, EndMode::Until];

    for frequency in frequencies {
        for mode in modes {
            let mut h = Harness::new(anchor(), None);
            h.dispatch(Action::SetFrequency(frequency))
                .dispatch(Action::SetInterval("3".to_string()))
                .dispatch(Action::SetEndMode(mode));

            let rule = h.rule();
            assert_eq!(rule.frequency(), frequency);
            assert!(
                !(rule.count().is_some() && rule.until().is_some()),
                "{frequency} {mode:?}"
            );
            match mode {
                EndMode::Never => assert_eq!(rule.end(), Termination::Never),
                EndMode::Count => assert!(rule.count().is_some()),
                EndMode::Until => assert!(rule.until().is_some()),
            }
        }
    }
}
