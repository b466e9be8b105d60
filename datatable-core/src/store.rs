//! Centralized state store with reducer pattern

use crate::action::{Action, ActionCategory};
use std::marker::PhantomData;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the state and provides a single point for mutations
/// through the `dispatch` method.
///
/// # Type Parameters
/// * `S` - The state type
/// * `A` - The action type (must implement `Action`)
///
/// # Example
/// ```
/// use datatable_core::state::reduce;
/// use datatable_core::{Row, Store, TableAction, TableConfig, TableState};
///
/// let rows = vec![Row::new().with("name", "Bob"), Row::new().with("name", "Ada")];
/// let mut store = Store::new(TableState::new(rows, vec![], TableConfig::default()), reduce);
/// assert!(store.dispatch(TableAction::sort("name")));
/// assert_eq!(store.state().rows()[0].get("name").unwrap().to_string(), "Ada");
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// Returns `true` if the state changed and a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Bypasses the reducer. Prefer dispatching actions.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

/// Store with middleware support
///
/// Wraps a `Store` and lets middleware observe every action before and
/// after the reducer runs.
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a mutable reference to the state
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging, auditing, or other cross-cutting
/// concerns to a table.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions with their category via `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Log both before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: ActionCategory> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(
                action = %action.name(),
                category = action.category().unwrap_or("-"),
                "Dispatching action"
            );
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                category = action.category().unwrap_or("-"),
                state_changed,
                "Action processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TableAction;
    use crate::config::TableConfig;
    use crate::state::{reduce, TableState};
    use crate::testing::numbered_rows;

    fn state(rows: usize) -> TableState {
        TableState::new(numbered_rows(rows), vec![], TableConfig::default())
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(state(12), reduce);

        assert!(store.dispatch(TableAction::PageNext));
        assert_eq!(store.state().pagination().current_page(), 2);

        assert!(store.dispatch(TableAction::PageNext));
        assert!(!store.dispatch(TableAction::PageNext));
        assert_eq!(store.state().pagination().current_page(), 3);
    }

    #[test]
    fn test_store_noop() {
        let mut store = Store::new(state(3), reduce);
        assert!(!store.dispatch(TableAction::PagePrev));
        assert!(!store.dispatch(TableAction::SearchSet(String::new())));
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        changed_count: usize,
        categories: Vec<&'static str>,
    }

    impl Middleware<TableAction> for CountingMiddleware {
        fn before(&mut self, action: &TableAction) {
            self.before_count += 1;
            self.categories.extend(action.category());
        }

        fn after(&mut self, _action: &TableAction, state_changed: bool) {
            if state_changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store =
            StoreWithMiddleware::new(state(12), reduce, CountingMiddleware::default());

        store.dispatch(TableAction::SearchSet("1".into()));
        store.dispatch(TableAction::sort("id"));
        store.dispatch(TableAction::PageSizeChange(0));

        let middleware = store.middleware();
        assert_eq!(middleware.before_count, 3);
        assert_eq!(middleware.changed_count, 2);
        assert_eq!(middleware.categories, vec!["search", "sort", "page"]);
    }

    #[test]
    fn test_logging_middleware_passes_through() {
        let mut store = StoreWithMiddleware::new(state(6), reduce, LoggingMiddleware::verbose());
        assert!(store.dispatch(TableAction::PageNext));
        assert_eq!(store.state().pagination().current_page(), 2);
    }
}
