//! The table handle used by rendering layers
//!
//! [`DataTable`] bundles a [`TableState`] with the reducer and an optional
//! middleware, and exposes one method per user interaction. Every mutating
//! method dispatches a [`TableAction`] and returns whether anything changed,
//! so the caller knows when to re-render.
//!
//! ```
//! use datatable_core::{Column, DataTable, Row, SortOrder, TableConfig};
//!
//! let rows: Vec<Row> = (1..=42).map(|i| Row::new().with("id", i)).collect();
//! let columns = vec![Column::new("Id", "id").unwrap()];
//! let config = TableConfig::from_json(r#"{"rowsPerPageOptions":[10]}"#).unwrap();
//! let mut table = DataTable::new(rows, columns, config);
//!
//! assert_eq!(table.pagination_summary().total_pages, 5);
//! table.activate_sort("id");
//! table.activate_sort("id");
//! assert_eq!(table.sort_indicator("id"), Some(SortOrder::Desc));
//! assert_eq!(table.visible_rows()[0].get("id").unwrap().to_string(), "42");
//! assert_eq!(table.pagination_summary().to_string(), "Showing 1 to 10 of 42 entries");
//! ```

use std::sync::Arc;

use crate::action::TableAction;
use crate::bus::SignalReceiver;
use crate::column::{columns_from_json, Column, CustomSort, SortType};
use crate::compare::SortOrder;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::features::Feature;
use crate::pagination::PaginationSummary;
use crate::state::{reduce, TableState};
use crate::store::{Middleware, NoopMiddleware, StoreWithMiddleware};
use crate::value::{rows_from_json, Row};

pub struct DataTable<M: Middleware<TableAction> = NoopMiddleware> {
    store: StoreWithMiddleware<TableState, TableAction, M>,
}

impl DataTable {
    /// Build a table over `rows` with no middleware
    pub fn new(rows: Vec<Row>, columns: Vec<Column>, config: TableConfig) -> Self {
        Self::from_state(TableState::new(rows, columns, config))
    }

    /// Wrap an already configured state
    pub fn from_state(state: TableState) -> Self {
        Self::with_middleware(state, NoopMiddleware)
    }

    /// Build a table from JSON rows, JSON column specs and a JSON config
    /// override object.
    pub fn from_json(rows: &str, columns: &str, config: &str) -> Result<Self, TableError> {
        Ok(Self::new(
            rows_from_json(rows)?,
            columns_from_json(columns)?,
            TableConfig::from_json(config)?,
        ))
    }
}

impl<M: Middleware<TableAction>> DataTable<M> {
    /// Wrap `state` and run `middleware` around every dispatch
    pub fn with_middleware(state: TableState, middleware: M) -> Self {
        Self {
            store: StoreWithMiddleware::new(state, reduce, middleware),
        }
    }

    /// Dispatch an action. Returns `true` if derived views changed.
    pub fn dispatch(&mut self, action: TableAction) -> bool {
        self.store.dispatch(action)
    }

    /// Get a reference to the table state
    pub fn state(&self) -> &TableState {
        self.store.state()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        self.store.middleware()
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        self.store.middleware_mut()
    }

    /// Rows on the current page, after search and sort.
    pub fn visible_rows(&self) -> &[Row] {
        self.state().visible_rows()
    }

    /// All rows after search and sort, across pages.
    pub fn rows(&self) -> &[Row] {
        self.state().rows()
    }

    pub fn columns(&self) -> &[Column] {
        self.state().columns()
    }

    pub fn config(&self) -> &TableConfig {
        self.state().config()
    }

    /// Search term as typed
    pub fn search_term(&self) -> &str {
        &self.state().search().state().term
    }

    /// Header glyph for `key`: the active direction, or `None`.
    pub fn sort_indicator(&self, key: &str) -> Option<SortOrder> {
        if !self.config().features.sortable {
            return None;
        }
        self.state().sort().state().indicator(key)
    }

    /// Header activation using the column's declared type and comparator.
    pub fn activate_sort(&mut self, key: &str) -> bool {
        let (kind, custom) = self
            .state()
            .column(key)
            .map(|c| (c.kind, c.custom_sort.clone()))
            .unwrap_or_default();
        self.activate_sort_with(key, kind, custom)
    }

    /// Header activation with an explicit type and comparator.
    pub fn activate_sort_with(
        &mut self,
        key: impl Into<String>,
        kind: Option<SortType>,
        custom: Option<CustomSort>,
    ) -> bool {
        self.dispatch(TableAction::SortActivate {
            key: key.into(),
            kind,
            custom,
        })
    }

    /// Replace the search term
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        self.dispatch(TableAction::SearchSet(term.into()))
    }

    /// Jump to a 1-based page. Out-of-range pages are ignored.
    pub fn select_page(&mut self, page: usize) -> bool {
        self.dispatch(TableAction::PageSelect(page))
    }

    /// Go to the next page
    pub fn increment_page(&mut self) -> bool {
        self.dispatch(TableAction::PageNext)
    }

    /// Go to the previous page
    pub fn decrement_page(&mut self) -> bool {
        self.dispatch(TableAction::PagePrev)
    }

    /// Change the page size and return to page 1. Zero is rejected.
    pub fn change_rows_per_page(&mut self, rows_per_page: usize) -> bool {
        self.dispatch(TableAction::PageSizeChange(rows_per_page))
    }

    /// See [`PaginationStage::is_active`](crate::pagination::PaginationStage::is_active).
    pub fn is_active(&self, page: Option<usize>) -> bool {
        self.state().pagination().is_active(page)
    }

    /// Whether the "previous" control should be enabled.
    pub fn can_go_previous(&self) -> bool {
        self.state().pagination().current_page() > 1
    }

    /// Whether the "next" control should be enabled.
    pub fn can_go_next(&self) -> bool {
        !self.is_active(None)
    }

    /// Footer data: page, counts and page buttons
    pub fn pagination_summary(&self) -> PaginationSummary {
        self.state().summary()
    }

    /// Replace the baseline rows. The pipeline re-runs from page 1.
    pub fn set_data(&mut self, rows: Vec<Row>) -> bool {
        self.dispatch(TableAction::DataReplace(Arc::new(rows)))
    }

    /// Turn a feature on or off
    pub fn set_feature(&mut self, feature: Feature, enabled: bool) -> bool {
        self.dispatch(TableAction::FeatureSet { feature, enabled })
    }

    /// Subscribe to the table's signals.
    pub fn subscribe(&self) -> SignalReceiver {
        self.state().bus().subscribe()
    }

    pub fn format_cell(&self, row: &Row, column: &Column) -> String {
        self.state().format_cell(row, column)
    }
}
