//! Test utilities for tables
//!
//! - [`SignalProbe`]: subscribes to a table's signal bus and drains what was published
//! - [`RecordingMiddleware`]: captures every dispatched action and its outcome
//! - [`numbered_rows`] and [`json_rows`]: quick fixtures
//! - Assertion macros for verifying signals and actions
//!
//! # Example
//!
//! ```
//! use datatable_core::testing::{numbered_rows, SignalProbe};
//! use datatable_core::{assert_emitted, DataTable, TableConfig, TableSignal};
//!
//! let mut table = DataTable::new(numbered_rows(12), vec![], TableConfig::default());
//! let mut probe = SignalProbe::new(table.subscribe());
//!
//! table.set_search_term("1");
//! let signals = probe.drain();
//! assert_emitted!(signals, TableSignal::FilterChanged { .. });
//! ```

use crate::action::{Action, ActionCategory};
use crate::bus::{SignalReceiver, TableSignal};
use crate::store::Middleware;
use crate::value::{rows_from_json, Row};

/// `n` rows with a 1-based `id` and a `name` of the form `"Row {id}"`.
pub fn numbered_rows(n: usize) -> Vec<Row> {
    (1..=n)
        .map(|id| {
            Row::new()
                .with("id", id as i64)
                .with("name", format!("Row {id}"))
        })
        .collect()
}

/// Parse rows from JSON.
///
/// # Panics
///
/// Panics if `json` is not an array of objects.
pub fn json_rows(json: &str) -> Vec<Row> {
    match rows_from_json(json) {
        Ok(rows) => rows,
        Err(err) => panic!("invalid fixture rows: {err}"),
    }
}

/// Collects signals published on a table's bus.
///
/// # Example
///
/// ```
/// use datatable_core::bus::{SignalBus, TableSignal};
/// use datatable_core::testing::SignalProbe;
///
/// let bus = SignalBus::new();
/// let mut probe = SignalProbe::new(bus.subscribe());
/// bus.publish(TableSignal::DataReplaced { rows: 3 });
/// assert_eq!(probe.drain(), vec![TableSignal::DataReplaced { rows: 3 }]);
/// assert!(probe.drain().is_empty());
/// ```
#[derive(Debug)]
pub struct SignalProbe {
    rx: SignalReceiver,
    lagged: bool,
}

impl SignalProbe {
    /// Watch an existing subscription
    pub fn new(rx: SignalReceiver) -> Self {
        Self { rx, lagged: false }
    }

    /// Drain all signals published since the last drain.
    pub fn drain(&mut self) -> Vec<TableSignal> {
        let drained = self.rx.drain();
        self.lagged |= drained.lagged;
        drained.signals
    }

    /// Whether anything was published since the last drain.
    pub fn has_signal(&mut self) -> bool {
        !self.drain().is_empty()
    }

    /// Whether the probe ever fell behind the bus.
    pub fn lagged(&self) -> bool {
        self.lagged
    }
}

/// Middleware that records every dispatched action.
///
/// Works with any action type; [`drain_category`](Self::drain_category)
/// needs [`ActionCategory`].
#[derive(Debug)]
pub struct RecordingMiddleware<A: Action> {
    actions: Vec<(A, bool)>,
}

impl<A: Action> Default for RecordingMiddleware<A> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<A: Action> Middleware<A> for RecordingMiddleware<A> {
    fn before(&mut self, _action: &A) {}

    fn after(&mut self, action: &A, state_changed: bool) {
        self.actions.push((action.clone(), state_changed));
    }
}

impl<A: Action> RecordingMiddleware<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all recorded actions.
    pub fn drain(&mut self) -> Vec<A> {
        self.actions.drain(..).map(|(action, _)| action).collect()
    }

    /// Drain only the actions that changed state.
    pub fn drain_changed(&mut self) -> Vec<A> {
        self.actions
            .drain(..)
            .filter_map(|(action, changed)| changed.then_some(action))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<A: ActionCategory> RecordingMiddleware<A> {
    /// Drain the actions of one category, keeping the rest.
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<_>, Vec<_>) = self
            .actions
            .drain(..)
            .partition(|(action, _)| action.category() == Some(category));
        self.actions = rest;
        matching.into_iter().map(|(action, _)| action).collect()
    }
}

/// Assert that a matching signal or action was emitted.
///
/// # Example
///
/// ```ignore
/// let signals = probe.drain();
/// assert_emitted!(signals, TableSignal::FilterChanged { matched: 2 });
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($items:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $items.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected item matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $items
        );
    };
}

/// Assert that no matching signal or action was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($items:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$items.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected item matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $items
        );
    };
}

/// Find the first matching signal or action.
///
/// # Example
///
/// ```ignore
/// if let Some(TableSignal::FilterChanged { matched }) =
///     find_emitted!(signals, TableSignal::FilterChanged { .. })
/// {
///     assert_eq!(*matched, 2);
/// }
/// ```
#[macro_export]
macro_rules! find_emitted {
    ($items:expr, $pattern:pat $(if $guard:expr)?) => {
        $items.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count matching signals or actions.
#[macro_export]
macro_rules! count_emitted {
    ($items:expr, $pattern:pat $(if $guard:expr)?) => {
        $items.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TableAction;
    use crate::bus::SignalBus;
    use crate::config::TableConfig;
    use crate::state::{reduce, TableState};
    use crate::store::StoreWithMiddleware;
    use crate::value::Value;

    #[test]
    fn test_numbered_rows() {
        let rows = numbered_rows(3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("id"), Some(&Value::from(1)));
        assert_eq!(rows[2].get("name"), Some(&Value::from("Row 3")));
    }

    #[test]
    fn test_json_rows() {
        let rows = json_rows(r#"[{"a":1},{"a":null}]"#);
        assert_eq!(rows[1].get("a"), Some(&Value::Null));
    }

    #[test]
    #[should_panic(expected = "invalid fixture rows")]
    fn test_json_rows_panics_on_garbage() {
        json_rows("nope");
    }

    #[test]
    fn test_probe_drains() {
        let bus = SignalBus::new();
        let mut probe = SignalProbe::new(bus.subscribe());
        assert!(!probe.has_signal());

        bus.publish(TableSignal::FilterChanged { matched: 1 });
        bus.publish(TableSignal::DataReplaced { rows: 4 });
        let signals = probe.drain();
        assert_eq!(count_emitted!(signals, TableSignal::FilterChanged { .. }), 1);
        assert_emitted!(signals, TableSignal::DataReplaced { rows: 4 });
        assert_not_emitted!(signals, TableSignal::DataReplaced { rows: 5 });
        assert!(!probe.lagged());
    }

    #[test]
    fn test_recording_middleware() {
        let state = TableState::new(numbered_rows(12), vec![], TableConfig::default());
        let mut store = StoreWithMiddleware::new(state, reduce, RecordingMiddleware::new());

        store.dispatch(TableAction::SearchSet("Row".into()));
        store.dispatch(TableAction::PageNext);
        store.dispatch(TableAction::PagePrev);
        store.dispatch(TableAction::PagePrev);
        assert_eq!(store.middleware().len(), 4);

        let pages = store.middleware_mut().drain_category("page");
        assert_eq!(pages.len(), 3);
        assert_eq!(count_emitted!(pages, TableAction::PagePrev), 2);

        let rest = store.middleware_mut().drain();
        assert_emitted!(rest, TableAction::SearchSet(term) if term == "Row");
        assert!(store.middleware().is_empty());
    }

    #[test]
    fn test_drain_changed_skips_rejected() {
        let state = TableState::new(numbered_rows(3), vec![], TableConfig::default());
        let mut store = StoreWithMiddleware::new(state, reduce, RecordingMiddleware::new());
        store.dispatch(TableAction::PageSizeChange(0));
        store.dispatch(TableAction::PageSizeChange(1));

        let changed = store.middleware_mut().drain_changed();
        let found = find_emitted!(changed, TableAction::PageSizeChange(_));
        assert!(matches!(found, Some(TableAction::PageSizeChange(1))));
        assert_eq!(changed.len(), 1);
    }
}
