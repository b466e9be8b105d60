//! Action traits and the table's action vocabulary
//!
//! Every mutation of a table (typing in the search box, clicking a header,
//! paging, swapping the data set) is described by a [`TableAction`] and
//! applied through the store. Nothing else writes to table state.

use std::fmt::Debug;
use std::sync::Arc;

use datatable_macros::Action;

use crate::column::{CustomSort, SortType};
use crate::features::Feature;
use crate::value::Row;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: So they can be queued from other threads
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Actions that belong to a named group (`"search"`, `"sort"`, ...)
pub trait ActionCategory: Action {
    /// Category of this action, or `None` for uncategorized actions
    fn category(&self) -> Option<&'static str>;
}

/// Everything that can happen to a data table.
#[derive(Clone, Debug, Action)]
pub enum TableAction {
    /// Replace the search term (raw input, trimmed when filtering)
    #[action(category = "search")]
    SearchSet(String),
    /// Header activation: select `key`, or toggle its order if already active
    #[action(category = "sort")]
    SortActivate {
        key: String,
        kind: Option<SortType>,
        custom: Option<CustomSort>,
    },
    /// Jump to a 1-based page
    #[action(category = "page")]
    PageSelect(usize),
    #[action(category = "page")]
    PageNext,
    #[action(category = "page")]
    PagePrev,
    /// Change rows per page; zero is rejected
    #[action(category = "page")]
    PageSizeChange(usize),
    /// Swap the immutable baseline for a new data set
    #[action(category = "data")]
    DataReplace(Arc<Vec<Row>>),
    /// Turn a configured feature on or off at runtime
    #[action(category = "feature")]
    FeatureSet { feature: Feature, enabled: bool },
}

impl TableAction {
    /// Shorthand for a plain header activation without type or comparator
    pub fn sort(key: impl Into<String>) -> Self {
        TableAction::SortActivate {
            key: key.into(),
            kind: None,
            custom: None,
        }
    }
}
