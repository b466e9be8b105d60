//! Sort stage: header activation state and row ordering
//!
//! The active [`SortState`] picks a comparator for every pair of rows:
//!
//! 1. A column's [`CustomSort`] wins outright. It sees the resolved values
//!    and owns the direction; toggling the order only flips the indicator.
//! 2. A declared [`SortType`] selects the matching scalar comparator. A
//!    declared `date` falls back to string comparison unless both values
//!    classify as dates.
//! 3. Without a declared type the kind is inferred. In
//!    [`InferenceMode::PerPair`] (the default) each compared pair is
//!    classified on its own, so mixed columns may compare inconsistently.
//!    [`InferenceMode::PerColumn`] classifies the whole column once.
//!
//! Rows without a value at the sort key get a sentinel of the declared
//! kind so they gather at one end instead of failing the comparison.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::collation::{Collator, LocaleCollator};
use crate::column::{CustomSort, SortType};
use crate::compare::{compare_bools, compare_dates, compare_numbers, compare_strings, SortOrder};
use crate::dates::{date_instant, is_date};
use crate::value::{Row, Value};

/// Collates after every string that can occur in real data.
pub const STRING_SENTINEL: &str = "\u{10FFFF}";

/// How an undeclared column's value kind is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferenceMode {
    /// Classify every compared pair independently
    #[default]
    PerPair,
    /// Classify the whole column once before sorting
    PerColumn,
}

/// Stand-in for a missing value at the sort key.
pub fn sentinel(kind: Option<SortType>) -> Value {
    match kind {
        Some(SortType::Number) => Value::Number(0.0),
        Some(SortType::Date) => Value::Date(NaiveDateTime::MIN),
        Some(SortType::Boolean) => Value::Bool(false),
        Some(SortType::String) | None => Value::String(STRING_SENTINEL.to_string()),
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    /// Empty when nothing is sorted
    pub key: String,
    pub order: SortOrder,
    pub kind: Option<SortType>,
    pub custom: Option<CustomSort>,
}

impl SortState {
    /// True once a header has been activated
    pub fn is_active(&self) -> bool {
        !self.key.is_empty()
    }

    /// Apply a header activation.
    ///
    /// A new key starts ascending and takes the given type and comparator
    /// as they are. The active key toggles its order and only replaces the
    /// type or comparator when one is supplied.
    pub fn activate(
        &mut self,
        key: impl Into<String>,
        kind: Option<SortType>,
        custom: Option<CustomSort>,
    ) {
        let key = key.into();
        if key == self.key {
            self.order = self.order.toggle();
            if kind.is_some() {
                self.kind = kind;
            }
            if custom.is_some() {
                self.custom = custom;
            }
        } else {
            self.key = key;
            self.order = SortOrder::Asc;
            self.kind = kind;
            self.custom = custom;
        }
    }

    /// Direction glyph for a header, present only on the active column.
    pub fn indicator(&self, key: &str) -> Option<SortOrder> {
        (self.is_active() && self.key == key).then_some(self.order)
    }
}

/// Owns the sort state and the collation strategy.
#[derive(Debug)]
pub struct SortStage {
    state: SortState,
    collator: Arc<dyn Collator>,
    inference: InferenceMode,
}

impl Default for SortStage {
    fn default() -> Self {
        Self::new(Arc::new(LocaleCollator))
    }
}

impl SortStage {
    /// Create an inactive stage comparing strings with `collator`
    pub fn new(collator: Arc<dyn Collator>) -> Self {
        Self {
            state: SortState::default(),
            collator,
            inference: InferenceMode::default(),
        }
    }

    /// Builder-style [`set_inference`](Self::set_inference)
    pub fn with_inference(mut self, inference: InferenceMode) -> Self {
        self.inference = inference;
        self
    }

    /// Replace the string collation strategy
    pub fn set_collator(&mut self, collator: Arc<dyn Collator>) {
        self.collator = collator;
    }

    /// Choose how untyped columns are classified
    pub fn set_inference(&mut self, inference: InferenceMode) {
        self.inference = inference;
    }

    /// Get a reference to the sort state
    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Get a mutable reference to the sort state
    pub fn state_mut(&mut self) -> &mut SortState {
        &mut self.state
    }

    /// Ordered copy of `rows` under the current state.
    ///
    /// Returns `rows` itself when no key is active or sorting is disabled.
    pub fn apply(&self, rows: &Arc<Vec<Row>>, enabled: bool) -> Arc<Vec<Row>> {
        if !enabled || !self.state.is_active() {
            return Arc::clone(rows);
        }
        let sorted = self.sort_rows(rows);
        trace!(
            key = %self.state.key,
            order = ?self.state.order,
            rows = sorted.len(),
            "Sort recomputed"
        );
        Arc::new(sorted)
    }

    /// Stable sort of `rows` by the active key, ignoring the enabled flag.
    pub fn sort_rows(&self, rows: &[Row]) -> Vec<Row> {
        if !self.state.is_active() {
            return rows.to_vec();
        }
        let kind = match (self.state.kind, self.inference) {
            (None, InferenceMode::PerColumn) if self.state.custom.is_none() => {
                Some(infer_column(rows, &self.state.key))
            }
            (kind, _) => kind,
        };

        let order = merge_sort_indices(rows.len(), |a, b| {
            self.compare_rows(&rows[a], &rows[b], kind)
        });
        order.into_iter().map(|i| rows[i].clone()).collect()
    }

    fn compare_rows(&self, a: &Row, b: &Row, kind: Option<SortType>) -> Ordering {
        let key = &self.state.key;
        let a = resolve(a, key, kind);
        let b = resolve(b, key, kind);

        if let Some(custom) = &self.state.custom {
            return custom.compare(&a, &b);
        }
        let kind = kind.unwrap_or_else(|| infer_pair(&a, &b));
        self.compare_values(&a, &b, kind)
    }

    fn compare_values(&self, a: &Value, b: &Value, kind: SortType) -> Ordering {
        let order = self.state.order;
        match kind {
            SortType::Date => match (date_instant(a), date_instant(b)) {
                (Some(a), Some(b)) => compare_dates(a, b, order),
                _ => self.compare_text(a, b),
            },
            SortType::Number => compare_numbers(
                a.as_number().unwrap_or(0.0),
                b.as_number().unwrap_or(0.0),
                order,
            ),
            SortType::Boolean => compare_bools(
                a.as_bool().unwrap_or(false),
                b.as_bool().unwrap_or(false),
                order,
            ),
            SortType::String => self.compare_text(a, b),
        }
    }

    fn compare_text(&self, a: &Value, b: &Value) -> Ordering {
        compare_strings(
            &a.to_string(),
            &b.to_string(),
            self.state.order,
            self.collator.as_ref(),
        )
    }
}

fn resolve<'a>(row: &'a Row, key: &str, kind: Option<SortType>) -> Cow<'a, Value> {
    match row.present(key) {
        Some(value) => Cow::Borrowed(value),
        None => Cow::Owned(sentinel(kind)),
    }
}

fn infer_pair(a: &Value, b: &Value) -> SortType {
    if is_date(a) && is_date(b) {
        SortType::Date
    } else if a.as_number().is_some() && b.as_number().is_some() {
        SortType::Number
    } else if a.as_bool().is_some() && b.as_bool().is_some() {
        SortType::Boolean
    } else {
        SortType::String
    }
}

/// Kind shared by every present value in the column, or string.
fn infer_column(rows: &[Row], key: &str) -> SortType {
    let mut values = rows.iter().filter_map(|row| row.present(key)).peekable();
    if values.peek().is_none() {
        return SortType::String;
    }
    let values: Vec<&Value> = values.collect();
    if values.iter().all(|v| is_date(v)) {
        SortType::Date
    } else if values.iter().all(|v| v.as_number().is_some()) {
        SortType::Number
    } else if values.iter().all(|v| v.as_bool().is_some()) {
        SortType::Boolean
    } else {
        SortType::String
    }
}

/// Stable bottom-up merge sort over `0..len`.
///
/// The right element is taken only when the comparator says the left one is
/// strictly greater, which keeps ties in input order. Every merge step
/// consumes one element, so the sort terminates and cannot panic even when
/// `cmp` is not a total order.
fn merge_sort_indices<F>(len: usize, mut cmp: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut src: Vec<usize> = (0..len).collect();
    let mut dst = vec![0; len];
    let mut width = 1;

    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j, mut k) = (start, mid, start);

            while i < mid && j < end {
                if cmp(src[i], src[j]) == Ordering::Greater {
                    dst[k] = src[j];
                    j += 1;
                } else {
                    dst[k] = src[i];
                    i += 1;
                }
                k += 1;
            }
            let rest = mid - i;
            dst[k..k + rest].copy_from_slice(&src[i..mid]);
            k += rest;
            dst[k..end].copy_from_slice(&src[j..end]);

            start = end;
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }
    src
}
