//! Scalar comparators
//!
//! One comparator per value kind. Descending order swaps the operands
//! instead of reversing the result, so a collator that is not perfectly
//! antisymmetric still yields the mirror ordering of the ascending case.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::collation::Collator;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Put the operands in comparison order for this direction.
    #[inline]
    pub fn arrange<T>(self, a: T, b: T) -> (T, T) {
        match self {
            SortOrder::Asc => (a, b),
            SortOrder::Desc => (b, a),
        }
    }
}

/// NaN compares equal to everything.
pub fn compare_numbers(a: f64, b: f64, order: SortOrder) -> Ordering {
    let (a, b) = order.arrange(a, b);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Strings in `collator` order.
pub fn compare_strings(a: &str, b: &str, order: SortOrder, collator: &dyn Collator) -> Ordering {
    let (a, b) = order.arrange(a, b);
    collator.compare(a, b)
}

/// Compares two instants. Callers classify both operands as dates first.
pub fn compare_dates(a: NaiveDateTime, b: NaiveDateTime, order: SortOrder) -> Ordering {
    let (a, b) = order.arrange(a, b);
    a.cmp(&b)
}

/// `false` sorts before `true` ascending.
pub fn compare_bools(a: bool, b: bool, order: SortOrder) -> Ordering {
    let (a, b) = order.arrange(a, b);
    a.cmp(&b)
}
