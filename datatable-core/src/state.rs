//! Table state and its reducer
//!
//! [`TableState`] owns the immutable baseline rows, the column
//! descriptions, the resolved configuration and the three pipeline stages.
//! [`reduce`] is the only code path that mutates it; after any action that
//! can change the working view it re-runs Search, then Sort, then lets
//! Pagination catch up.

use std::sync::Arc;

use tracing::debug;

use crate::action::TableAction;
use crate::bus::{SignalBus, TableSignal};
use crate::collation::{Collator, LocaleCollator};
use crate::column::Column;
use crate::config::TableConfig;
use crate::features::{Feature, TableFeatures};
use crate::format::format_cell;
use crate::pagination::{PageView, PaginationStage, PaginationSummary};
use crate::search::SearchStage;
use crate::sort::{InferenceMode, SortStage};
use crate::value::{Row, Value};

#[derive(Debug)]
pub struct TableState {
    initial: Arc<Vec<Row>>,
    /// Searched then sorted rows, before slicing
    view: Arc<Vec<Row>>,
    columns: Vec<Column>,
    config: TableConfig,
    bus: SignalBus,
    search: SearchStage,
    sort: SortStage,
    pagination: PaginationStage,
}

impl TableState {
    /// Build a table over `rows` and run the pipeline once.
    ///
    /// ```
    /// use datatable_core::{Column, Row, TableConfig, TableState};
    ///
    /// let rows = vec![Row::new().with("name", "Ada"), Row::new().with("name", "Bob")];
    /// let columns = vec![Column::new("Name", "name").unwrap()];
    /// let state = TableState::new(rows, columns, TableConfig::default());
    /// assert_eq!(state.visible_rows().len(), 2);
    /// ```
    pub fn new(rows: Vec<Row>, columns: Vec<Column>, config: TableConfig) -> Self {
        let bus = SignalBus::new();
        let mut pagination =
            PaginationStage::new(config.rows_per_page_options.clone(), bus.subscribe());
        pagination.set_enabled(config.features.pagination);

        let initial = Arc::new(rows);
        let mut state = Self {
            view: Arc::clone(&initial),
            initial,
            columns,
            config,
            search: SearchStage::new(bus.clone()),
            sort: SortStage::new(Arc::new(LocaleCollator)),
            pagination,
            bus,
        };
        state.refresh();
        state
    }

    /// Use `collator` for string comparison.
    pub fn with_collator(mut self, collator: Arc<dyn Collator>) -> Self {
        self.sort.set_collator(collator);
        self.refresh();
        self
    }

    /// Classify untyped sort columns with `inference` and re-derive the view
    pub fn with_inference(mut self, inference: InferenceMode) -> Self {
        self.sort.set_inference(inference);
        self.refresh();
        self
    }

    /// Re-derive the working view: Search, then Sort, then Pagination.
    fn refresh(&mut self) {
        let features = self.config.features;
        let searched = self.search.apply(&self.initial, features.search);
        self.view = self.sort.apply(&searched, features.sortable);
        self.pagination.sync(self.view.len());
    }

    /// Baseline rows as supplied by the caller.
    pub fn initial_rows(&self) -> &[Row] {
        &self.initial
    }

    /// Searched and sorted rows across all pages.
    pub fn rows(&self) -> &[Row] {
        &self.view
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> &[Row] {
        self.page().slice
    }

    /// Current page of the working view
    pub fn page(&self) -> PageView<'_> {
        self.pagination.view(&self.view)
    }

    /// Footer data for the working view
    pub fn summary(&self) -> PaginationSummary {
        self.pagination.summary(&self.view, self.initial.len())
    }

    /// Column descriptions in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column with the given key
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Feature toggles currently in effect
    pub fn features(&self) -> TableFeatures {
        self.config.features
    }

    /// Bus shared by the stages
    pub fn bus(&self) -> &SignalBus {
        &self.bus
    }

    pub fn search(&self) -> &SearchStage {
        &self.search
    }

    pub fn sort(&self) -> &SortStage {
        &self.sort
    }

    pub fn pagination(&self) -> &PaginationStage {
        &self.pagination
    }

    /// Display text for `column` in `row`.
    pub fn format_cell(&self, row: &Row, column: &Column) -> String {
        let value = row.get(&column.key).unwrap_or(&Value::Null);
        format_cell(value, column, &self.config.date_format)
    }
}

/// Apply `action` to `state`. Returns `true` if anything observable changed.
pub fn reduce(state: &mut TableState, action: TableAction) -> bool {
    match action {
        TableAction::SearchSet(term) => {
            if !state.search.set_term(term) {
                return false;
            }
            state.refresh();
            true
        }

        TableAction::SortActivate { key, kind, custom } => {
            if !state.config.features.sortable {
                debug!(%key, "Sorting disabled, activation ignored");
                return false;
            }
            state.sort.state_mut().activate(key, kind, custom);
            state.refresh();
            true
        }

        TableAction::PageSelect(page) => state.pagination.select_page(page),
        TableAction::PageNext => state.pagination.increment(),
        TableAction::PagePrev => state.pagination.decrement(),
        TableAction::PageSizeChange(rows_per_page) => {
            state.pagination.change_rows_per_page(rows_per_page)
        }

        TableAction::DataReplace(rows) => {
            state.initial = rows;
            state.bus.publish(TableSignal::DataReplaced {
                rows: state.initial.len(),
            });
            state.refresh();
            true
        }

        TableAction::FeatureSet { feature, enabled } => {
            let slot = state.config.features.slot(feature);
            if *slot == enabled {
                return false;
            }
            *slot = enabled;
            if feature == Feature::Pagination {
                state.pagination.set_enabled(enabled);
            }
            state.refresh();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::SortOrder;
    use crate::config::PartialTableConfig;
    use crate::testing::numbered_rows;

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("name", "Carla").with("age", 25),
            Row::new().with("name", "bob").with("age", 30),
            Row::new().with("name", "Alice").with("age", 125),
            Row::new().with("name", "Dan").with("age", 41),
            Row::new().with("name", "Émile").with("age", 19),
        ]
    }

    fn table(options: Vec<usize>) -> TableState {
        let config = TableConfig::from(PartialTableConfig {
            rows_per_page_options: Some(options),
            ..Default::default()
        });
        TableState::new(people(), vec![], config)
    }

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_search_then_sort_then_page() {
        let mut state = table(vec![1]);
        reduce(&mut state, TableAction::SearchSet("25".into()));
        reduce(&mut state, TableAction::sort("name"));
        assert_eq!(names(state.rows()), vec!["Alice", "Carla"]);
        assert_eq!(names(state.visible_rows()), vec!["Alice"]);
        assert_eq!(state.pagination().total_pages(), 2);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut state = table(vec![2]);
        assert!(reduce(&mut state, TableAction::PageSelect(3)));
        assert!(reduce(&mut state, TableAction::SearchSet("a".into())));
        assert_eq!(state.pagination().current_page(), 1);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut state = table(vec![2]);
        reduce(&mut state, TableAction::PageSelect(2));
        reduce(&mut state, TableAction::sort("age"));
        assert_eq!(state.pagination().current_page(), 2);
        assert_eq!(names(state.visible_rows()), vec!["bob", "Dan"]);
    }

    #[test]
    fn test_sort_ignored_when_disabled() {
        let mut state = table(vec![5]);
        reduce(
            &mut state,
            TableAction::FeatureSet {
                feature: Feature::Sortable,
                enabled: false,
            },
        );
        assert!(!reduce(&mut state, TableAction::sort("name")));
        assert_eq!(state.sort().state().indicator("name"), None);
        assert_eq!(names(state.rows()), names(&people()));
    }

    #[test]
    fn test_disabling_search_restores_baseline() {
        let mut state = table(vec![5]);
        reduce(&mut state, TableAction::SearchSet("bob".into()));
        assert_eq!(state.rows().len(), 1);
        reduce(
            &mut state,
            TableAction::FeatureSet {
                feature: Feature::Search,
                enabled: false,
            },
        );
        assert_eq!(state.rows().len(), 5);
        assert_eq!(state.search().state().term, "bob");
    }

    #[test]
    fn test_reenabling_search_resets_page() {
        let config = TableConfig::from(PartialTableConfig {
            rows_per_page_options: Some(vec![2]),
            ..Default::default()
        });
        let mut state = TableState::new(numbered_rows(20), vec![], config);
        let search = |enabled| TableAction::FeatureSet {
            feature: Feature::Search,
            enabled,
        };

        reduce(&mut state, TableAction::SearchSet("1".into()));
        reduce(&mut state, search(false));
        assert!(reduce(&mut state, TableAction::PageSelect(4)));

        assert!(reduce(&mut state, search(true)));
        assert_eq!(state.rows().len(), 11);
        assert_eq!(state.pagination().current_page(), 1);
        assert_eq!(state.visible_rows()[0].get("id"), Some(&Value::from(1)));

        assert!(reduce(&mut state, TableAction::PageSelect(3)));
        reduce(&mut state, search(false));
        assert_eq!(state.pagination().current_page(), 1);
    }

    #[test]
    fn test_disabling_pagination_shows_all_rows() {
        let mut state = table(vec![2]);
        reduce(&mut state, TableAction::PageNext);
        reduce(
            &mut state,
            TableAction::FeatureSet {
                feature: Feature::Pagination,
                enabled: false,
            },
        );
        assert_eq!(state.visible_rows().len(), 5);
        assert_eq!(state.pagination().current_page(), 1);
        assert_eq!(state.summary().total_pages, 1);
    }

    #[test]
    fn test_data_replace_resets_and_resorts() {
        let mut state = table(vec![2]);
        reduce(&mut state, TableAction::sort("name"));
        reduce(&mut state, TableAction::sort("name"));
        reduce(&mut state, TableAction::PageSelect(2));

        let fresh = vec![
            Row::new().with("name", "Zed"),
            Row::new().with("name", "Amy"),
            Row::new().with("name", "Max"),
        ];
        assert!(reduce(&mut state, TableAction::DataReplace(Arc::new(fresh))));
        assert_eq!(state.pagination().current_page(), 1);
        assert_eq!(state.sort().state().order, SortOrder::Desc);
        assert_eq!(names(state.rows()), vec!["Zed", "Max", "Amy"]);
        assert_eq!(state.initial_rows().len(), 3);
    }

    #[test]
    fn test_feature_set_unchanged_is_noop() {
        let mut state = table(vec![5]);
        assert!(!reduce(
            &mut state,
            TableAction::FeatureSet {
                feature: Feature::Search,
                enabled: true,
            }
        ));
    }

    #[test]
    fn test_page_size_change() {
        let mut state = table(vec![2, 4]);
        reduce(&mut state, TableAction::PageNext);
        assert!(!reduce(&mut state, TableAction::PageSizeChange(0)));
        assert_eq!(state.pagination().current_page(), 2);
        assert!(reduce(&mut state, TableAction::PageSizeChange(4)));
        assert_eq!(state.pagination().current_page(), 1);
        assert_eq!(state.summary().rows_per_page, Some(4));
    }

    #[test]
    fn test_format_cell_uses_configured_dates() {
        let column = Column::new("Joined", "joined")
            .unwrap()
            .with_type(crate::column::SortType::Date);
        let state = TableState::new(vec![], vec![column.clone()], TableConfig::default());
        let row = Row::new().with("joined", "2021-03-09");
        assert_eq!(state.format_cell(&row, &column), "09 mars 2021");
        assert_eq!(state.format_cell(&Row::new(), &column), "");
    }
}
