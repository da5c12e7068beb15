// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Publishing through the dispatcher.

use std::{cell::RefCell, rc::Rc};

use recur_core::{Action, Frequency, RecurrenceRule};

use crate::common::{Harness, anchor, nz};

#[test]
fn every_change_publishes_latest_rule() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Weekly))
        .toggle(1)
        .dispatch(Action::SetInterval("2".to_string()));

    assert_eq!(h.published.borrow().len(), 3);
    assert_eq!(h.last(), Some(Some(h.rule())));
}

#[test]
fn no_op_actions_publish_nothing() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetFrequency(Frequency::Daily))
        .dispatch(Action::SetInterval("1".to_string()))
        .dispatch(Action::SetInterval("0".to_string()))
        .dispatch(Action::SetDayOfMonth("3".to_string()));
    assert!(h.published.borrow().is_empty());

    // the anchor's weekday is the only selected day
    h.dispatch(Action::SetFrequency(Frequency::Weekly));
    h.toggle(5);
    assert_eq!(h.published.borrow().len(), 1);
}

#[test]
fn repeat_toggle_publishes_none_and_restores() {
    let mut h = Harness::new(anchor(), None);
    h.dispatch(Action::SetInterval("4".to_string()))
        .dispatch(Action::SetRepeat(false));
    assert_eq!(h.last(), Some(None));

    // edits while off are kept but still publish none
    h.dispatch(Action::SetInterval("5".to_string()));
    assert_eq!(h.last(), Some(None));

    h.dispatch(Action::SetRepeat(true));
    assert_eq!(
        h.last(),
        Some(Some(RecurrenceRule::daily().with_interval(nz(5))))
    );
}

#[test]
fn other_subscribers_see_the_same_actions() {
    let mut h = Harness::new(anchor(), None);
    let seen = Rc::new(RefCell::new(0));
    let counter = seen.clone();
    h.dispatcher.register(Rc::new(RefCell::new(move |_: &Action| {
        *counter.borrow_mut() += 1;
    })));

    h.dispatch(Action::SetFrequency(Frequency::Monthly))
        .dispatch(Action::SetFrequency(Frequency::Monthly));
    assert_eq!(*seen.borrow(), 2);
    assert_eq!(h.published.borrow().len(), 1);
}
