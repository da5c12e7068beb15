// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use crate::editor::EndMode;
use crate::rule::{Frequency, PatternMode, WeekOfMonth};
use crate::weekday::WeekdayButton;

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

/// Delivers form actions to subscribers, in registration order.
#[derive(Default)]
pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    /// Creates a dispatcher with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Adds a subscriber.
    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    /// Calls every subscriber with the action before returning.
    pub fn dispatch(&mut self, action: &Action) {
        tracing::trace!(?action, subscribers = self.subscribers.len(), "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(action);
        }
    }
}

/// A change made through the rule form.
///
/// Text inputs carry the raw text and are coerced by the editor. Weekdays carry
/// the button index, never an ISO number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetRepeat(bool),
    SetFrequency(Frequency),
    SetInterval(String),
    ToggleWeekday(WeekdayButton),
    SetMonthlyMode(PatternMode),
    SetYearlyMode(PatternMode),
    SetMonth(String),
    SetDayOfMonth(String),
    SetWeekOfMonth(WeekOfMonth),
    SetWeekday(WeekdayButton),
    SetDaysFromEnd(String),
    SetEndMode(EndMode),
    SetCount(String),
    SetUntil(String),
}
