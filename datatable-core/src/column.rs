//! Column descriptions

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::value::Value;

/// Declared value type of a column, used to pick a comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    String,
    Number,
    Date,
    Boolean,
}

type CompareFn = dyn Fn(&Value, &Value) -> Ordering + Send + Sync;

/// User-supplied comparator that replaces the built-in ones for a column.
///
/// The comparator receives the two resolved cell values and owns the
/// direction: toggling the sort order flips the header indicator but is not
/// applied on top of a custom comparator.
#[derive(Clone)]
pub struct CustomSort(Arc<CompareFn>);

impl CustomSort {
    /// Wrap a comparator closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        CustomSort(Arc::new(f))
    }

    /// Run the comparator on two resolved values
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        (self.0)(a, b)
    }
}

impl fmt::Debug for CustomSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomSort(..)")
    }
}

/// A named, optionally typed accessor into each row.
#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    pub key: String,
    pub kind: Option<SortType>,
    pub custom_sort: Option<CustomSort>,
}

impl Column {
    /// Create a column, rejecting an empty key.
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Result<Self, TableError> {
        let title = title.into();
        let key = key.into();
        if key.is_empty() {
            return Err(TableError::EmptyColumnKey { title });
        }
        Ok(Self {
            title,
            key,
            kind: None,
            custom_sort: None,
        })
    }

    /// Declare the column's value type
    pub fn with_type(mut self, kind: SortType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attach a comparator that replaces the built-in ones
    pub fn with_custom_sort(mut self, sort: CustomSort) -> Self {
        self.custom_sort = Some(sort);
        self
    }
}

/// Serialized form of a column, as found in JSON column lists.
///
/// The key may be spelled `key` or `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub title: String,
    #[serde(alias = "data")]
    pub key: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SortType>,
}

impl TryFrom<ColumnSpec> for Column {
    type Error = TableError;

    fn try_from(spec: ColumnSpec) -> Result<Self, Self::Error> {
        let column = Column::new(spec.title, spec.key)?;
        Ok(match spec.kind {
            Some(kind) => column.with_type(kind),
            None => column,
        })
    }
}

/// Parse a JSON array of column specs and validate every key.
pub fn columns_from_json(json: &str) -> Result<Vec<Column>, TableError> {
    let specs: Vec<ColumnSpec> = serde_json::from_str(json).map_err(TableError::Config)?;
    specs.into_iter().map(Column::try_from).collect()
}
