//! datatable: search, sort and pagination state for data tables
//!
//! Like Redux/Elm, but for tables. The rendering layer reads derived rows
//! and footer data, and every interaction goes through a dispatched action.
//!
//! # Example
//! ```
//! use datatable::prelude::*;
//!
//! let rows: Vec<Row> = (1..=42).map(|i| Row::new().with("id", i)).collect();
//! let config = TableConfig::from_json(r#"{ "rowsPerPageOptions": [10, 20] }"#).unwrap();
//! let mut table = DataTable::new(rows, vec![], config);
//!
//! table.select_page(5);
//! assert_eq!(table.visible_rows().len(), 2);
//!
//! table.change_rows_per_page(20);
//! assert_eq!(table.pagination_summary().current_page, 1);
//! ```

// Re-export everything from core
pub use datatable_core::*;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use datatable_core::{Action, ActionCategory, Collator, FeatureFlags, Middleware};

    // Data model
    pub use datatable_core::{Column, CustomSort, Row, SortType, Value};

    // Configuration
    pub use datatable_core::{DateFormat, DateStyle, Feature, TableConfig, TableError};

    // Table
    pub use datatable_core::{
        reduce, DataTable, InferenceMode, PageButton, PaginationSummary, SortOrder,
        TableAction, TableSignal, TableState,
    };

    // Store
    pub use datatable_core::{
        LoggingMiddleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    // Collation
    pub use datatable_core::{LocaleCollator, OrdinalCollator};
}
