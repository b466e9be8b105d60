//! Core types for datatable
//!
//! This crate holds the client-side data pipeline behind an interactive
//! table: free-text search, column sorting and pagination over an in-memory
//! set of rows, with centralized state following a Redux/Elm-inspired
//! architecture.
//!
//! # Core Concepts
//!
//! - **Action**: [`TableAction`] describes every user interaction
//! - **Store**: [`TableState`] is mutated only by the [`reduce`] function
//! - **Stages**: Search → Sort → Pagination, re-run in that order
//! - **SignalBus**: broadcast channel that tells pagination when results change
//! - **Collator**: pluggable string comparison for sorting
//!
//! # Basic Example
//!
//! ```
//! use datatable_core::prelude::*;
//!
//! let rows = vec![
//!     Row::new().with("name", "b").with("age", 25),
//!     Row::new().with("name", "à").with("age", 31),
//!     Row::new().with("name", "z").with("age", 125),
//! ];
//! let columns = vec![
//!     Column::new("Name", "name").unwrap(),
//!     Column::new("Age", "age").unwrap().with_type(SortType::Number),
//! ];
//! let mut table = DataTable::new(rows, columns, TableConfig::default());
//!
//! table.set_search_term("25");
//! assert_eq!(table.rows().len(), 2);
//!
//! table.set_search_term("");
//! table.activate_sort("name");
//! let names: Vec<String> = table
//!     .visible_rows()
//!     .iter()
//!     .map(|r| r.get("name").unwrap().to_string())
//!     .collect();
//! assert_eq!(names, ["à", "b", "z"]);
//! ```
//!
//! # Driving the reducer directly
//!
//! [`DataTable`] is a thin wrapper over [`StoreWithMiddleware`]. Anything it
//! does can be done by dispatching actions yourself:
//!
//! ```
//! use datatable_core::prelude::*;
//!
//! let state = TableState::new(vec![], vec![], TableConfig::default());
//! let mut store = StoreWithMiddleware::new(state, reduce, LoggingMiddleware::new());
//! assert!(!store.dispatch(TableAction::PageNext));
//! ```

// Lets derive output name `datatable_core` paths from inside this crate
extern crate self as datatable_core;

pub mod action;
pub mod bus;
pub mod collation;
pub mod column;
pub mod compare;
pub mod config;
pub mod dates;
pub mod error;
pub mod features;
pub mod format;
pub mod page;
pub mod pagination;
pub mod search;
pub mod sort;
pub mod state;
pub mod store;
pub mod table;
pub mod testing;
pub mod value;

// Core trait exports
pub use action::{Action, ActionCategory, TableAction};
pub use collation::{Collator, LocaleCollator, OrdinalCollator};
pub use features::{Feature, FeatureFlags, TableFeatures};

// Derive macros
pub use datatable_macros::{Action, FeatureFlags};

// Data model exports
pub use column::{columns_from_json, Column, ColumnSpec, CustomSort, SortType};
pub use value::{rows_from_json, Row, Value};

// Configuration exports
pub use config::{DateFormat, DateStyle, PartialDateFormat, PartialTableConfig, TableConfig};
pub use error::TableError;

// Pipeline exports
pub use bus::{SignalBus, SignalReceiver, TableSignal};
pub use compare::SortOrder;
pub use page::PageButton;
pub use pagination::{PageView, PaginationState, PaginationSummary};
pub use search::SearchState;
pub use sort::{InferenceMode, SortState};
pub use state::{reduce, TableState};
pub use table::DataTable;

// Store exports
pub use store::{
    LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
};

// Testing exports
pub use testing::{json_rows, numbered_rows, RecordingMiddleware, SignalProbe};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, TableAction};
    pub use crate::bus::{SignalReceiver, TableSignal};
    pub use crate::collation::{Collator, LocaleCollator, OrdinalCollator};
    pub use crate::column::{Column, CustomSort, SortType};
    pub use crate::compare::SortOrder;
    pub use crate::config::{DateFormat, DateStyle, TableConfig};
    pub use crate::error::TableError;
    pub use crate::features::{Feature, FeatureFlags, TableFeatures};
    pub use crate::page::PageButton;
    pub use crate::pagination::PaginationSummary;
    pub use crate::sort::InferenceMode;
    pub use crate::state::{reduce, TableState};
    pub use crate::store::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };
    pub use crate::table::DataTable;
    pub use crate::value::{Row, Value};
}
