// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! An editor wired to a dispatcher, recording what it publishes.

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use recur_core::{Action, Config, Dispatcher, EditorStore, RecurrenceRule, WeekdayButton};

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub store: Rc<RefCell<EditorStore>>,
    pub published: Rc<RefCell<Vec<Option<RecurrenceRule>>>>,
}

impl Harness {
    pub fn new(anchor: NaiveDate, value: Option<&RecurrenceRule>) -> Self {
        Self::with_config(anchor, value, &Config::default())
    }

    pub fn with_config(anchor: NaiveDate, value: Option<&RecurrenceRule>, config: &Config) -> Self {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = published.clone();
        let store = EditorStore::new(anchor, value, config, move |rule| {
            sink.borrow_mut().push(rule.copied());
        });

        let store = Rc::new(RefCell::new(store));
        let mut dispatcher = Dispatcher::new();
        EditorStore::register_to(store.clone(), &mut dispatcher);

        Self {
            dispatcher,
            store,
            published,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> &mut Self {
        self.dispatcher.dispatch(&action);
        self
    }

    /// Toggles the weekday button at the Sunday-first index.
    pub fn toggle(&mut self, index: u8) -> &mut Self {
        self.dispatch(Action::ToggleWeekday(WeekdayButton::new(index).unwrap()))
    }

    /// The most recently published value.
    pub fn last(&self) -> Option<Option<RecurrenceRule>> {
        self.published.borrow().last().copied()
    }

    /// The current rule, failing if repeating is off.
    pub fn rule(&self) -> RecurrenceRule {
        self.store.borrow().output().expect("rule should repeat")
    }
}
