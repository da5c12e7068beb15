// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, fmt, rc::Rc};

use chrono::NaiveDate;

use crate::config::Config;
use crate::dispatcher::{Action, Dispatcher};
use crate::editor::EditorState;
use crate::rule::RecurrenceRule;

type OnChange = Box<dyn FnMut(Option<&RecurrenceRule>)>;

/// Holds the editor state and publishes the rule after every change.
pub struct EditorStore {
    state: EditorState,
    on_change: OnChange,
}

impl EditorStore {
    /// Creates a store. Nothing is published until the first change.
    pub fn new(
        anchor: NaiveDate,
        value: Option<&RecurrenceRule>,
        config: &Config,
        on_change: impl FnMut(Option<&RecurrenceRule>) + 'static,
    ) -> Self {
        Self {
            state: EditorState::new(anchor, value, config),
            on_change: Box::new(on_change),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The rule as currently published.
    pub fn output(&self) -> Option<RecurrenceRule> {
        self.state.output()
    }

    /// Applies an action and publishes the result if anything changed.
    pub fn apply(&mut self, action: &Action) {
        if self.state.apply(action) {
            let rule = self.state.output();
            tracing::debug!(?rule, "publishing rule");
            (self.on_change)(rule.as_ref());
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().apply(action);
        }));
        dispatcher.register(callback);
    }
}

impl fmt::Debug for EditorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Frequency;

    #[test]
    fn publishes_only_on_change() {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = published.clone();
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let store = EditorStore::new(anchor, None, &Config::default(), move |rule| {
            sink.borrow_mut().push(rule.copied());
        });

        let store = Rc::new(RefCell::new(store));
        let mut dispatcher = Dispatcher::new();
        EditorStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(&Action::SetFrequency(Frequency::Daily));
        assert!(published.borrow().is_empty());

        dispatcher.dispatch(&Action::SetInterval("2".to_string()));
        dispatcher.dispatch(&Action::SetRepeat(false));

        let published = published.borrow();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].map(|r| r.interval().get()), Some(2));
        assert_eq!(published[1], None);
        assert_eq!(store.borrow().output(), None);
    }
}
