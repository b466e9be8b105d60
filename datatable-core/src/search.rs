//! Search stage: free-text filtering of the baseline rows

use std::sync::Arc;

use tracing::trace;

use crate::bus::{SignalBus, TableSignal};
use crate::value::Row;

/// Rows where any field's text contains `term`, case-insensitively.
///
/// The term is trimmed first; a blank term keeps every row. Matching is a
/// plain substring test over each field's display string.
///
/// ```
/// use datatable_core::{search::filter_rows, Row};
///
/// let rows = vec![
///     Row::new().with("name", "Ada").with("age", 36),
///     Row::new().with("name", "Grace").with("age", 85),
/// ];
/// assert_eq!(filter_rows(&rows, "ada").len(), 1);
/// assert_eq!(filter_rows(&rows, "  ").len(), 2);
/// ```
pub fn filter_rows(rows: &[Row], term: &str) -> Vec<Row> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| row_matches(row, &needle))
        .cloned()
        .collect()
}

fn row_matches(row: &Row, needle: &str) -> bool {
    row.values()
        .any(|value| value.to_string().to_lowercase().contains(needle))
}

/// Search term as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
}

impl SearchState {
    /// The term used for matching.
    pub fn effective_term(&self) -> &str {
        self.term.trim()
    }
}

#[derive(Debug)]
struct Memo {
    source: Arc<Vec<Row>>,
    term: String,
    result: Arc<Vec<Row>>,
}

/// Owns the search term and a memo of the last filtered view.
///
/// The filtered view is recomputed only when the baseline (by identity) or
/// the effective term changes. Every recomputation publishes
/// [`TableSignal::FilterChanged`] so pagination can jump back to page 1.
#[derive(Debug)]
pub struct SearchStage {
    state: SearchState,
    memo: Option<Memo>,
    bus: SignalBus,
}

impl SearchStage {
    /// Create a stage with an empty term that publishes on `bus`
    pub fn new(bus: SignalBus) -> Self {
        Self {
            state: SearchState::default(),
            memo: None,
            bus,
        }
    }

    /// Get a reference to the search state
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Store a new raw term. Returns `false` if nothing changed.
    pub fn set_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.state.term {
            return false;
        }
        self.state.term = term;
        true
    }

    /// Derive the searched view of `source`.
    ///
    /// With search disabled the untouched baseline is returned. Switching
    /// between the filtered view and the baseline drops the memo and
    /// publishes [`TableSignal::FilterChanged`], in both directions.
    pub fn apply(&mut self, source: &Arc<Vec<Row>>, enabled: bool) -> Arc<Vec<Row>> {
        if !enabled {
            if self.memo.take().is_some() {
                trace!(rows = source.len(), "Search disabled, baseline restored");
                self.bus.publish(TableSignal::FilterChanged {
                    matched: source.len(),
                });
            }
            return Arc::clone(source);
        }

        let term = self.state.effective_term();
        if let Some(memo) = &self.memo {
            if Arc::ptr_eq(&memo.source, source) && memo.term == term {
                return Arc::clone(&memo.result);
            }
        }

        let result = if term.is_empty() {
            Arc::clone(source)
        } else {
            Arc::new(filter_rows(source, term))
        };
        trace!(
            term,
            input = source.len(),
            output = result.len(),
            "Search recomputed"
        );

        self.memo = Some(Memo {
            source: Arc::clone(source),
            term: term.to_string(),
            result: Arc::clone(&result),
        });
        self.bus.publish(TableSignal::FilterChanged {
            matched: result.len(),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Arc<Vec<Row>> {
        Arc::new(vec![
            Row::new().with("name", "Alice").with("age", 25),
            Row::new().with("name", "Bob").with("age", 30),
            Row::new().with("name", "Carla").with("zip", "12503"),
            Row::new().with("name", "Dan").with("age", 41),
            Row::new().with("name", "Eve").with("active", true),
        ])
    }

    #[test]
    fn test_filter_any_field_case_insensitive() {
        let data = rows();
        assert_eq!(filter_rows(&data, "25").len(), 2);
        assert_eq!(filter_rows(&data, "ALICE").len(), 1);
        assert_eq!(filter_rows(&data, " bob ").len(), 1);
        assert_eq!(filter_rows(&data, "true").len(), 1);
        assert!(filter_rows(&data, "zzz").is_empty());
    }

    #[test]
    fn test_blank_term_returns_everything() {
        assert_eq!(filter_rows(&rows(), "").len(), 5);
        assert_eq!(filter_rows(&rows(), "   ").len(), 5);
    }

    #[test]
    fn test_memoized_until_term_or_source_changes() {
        let bus = SignalBus::new();
        let mut rx = bus.subscribe();
        let mut stage = SearchStage::new(bus);
        let data = rows();

        stage.set_term("25");
        let first = stage.apply(&data, true);
        assert_eq!(first.len(), 2);
        assert_eq!(rx.drain().signals.len(), 1);

        // Same term after trimming hits the memo
        stage.set_term(" 25 ");
        let second = stage.apply(&data, true);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(rx.drain().signals.is_empty());

        // New source identity recomputes
        let replaced = Arc::new(data.as_ref().clone());
        stage.apply(&replaced, true);
        assert_eq!(
            rx.drain().signals,
            vec![TableSignal::FilterChanged { matched: 2 }]
        );
    }

    #[test]
    fn test_disabled_returns_baseline() {
        let mut stage = SearchStage::new(SignalBus::new());
        let data = rows();
        stage.set_term("bob");
        let view = stage.apply(&data, false);
        assert!(Arc::ptr_eq(&view, &data));
    }

    #[test]
    fn test_toggling_off_and_on_signals_both_ways() {
        let bus = SignalBus::new();
        let mut rx = bus.subscribe();
        let mut stage = SearchStage::new(bus);
        let data = rows();

        stage.set_term("25");
        stage.apply(&data, true);
        rx.drain();

        stage.apply(&data, false);
        assert_eq!(
            rx.drain().signals,
            vec![TableSignal::FilterChanged { matched: 5 }]
        );
        // Staying disabled stays quiet
        stage.apply(&data, false);
        assert!(rx.drain().signals.is_empty());

        let view = stage.apply(&data, true);
        assert_eq!(view.len(), 2);
        assert_eq!(
            rx.drain().signals,
            vec![TableSignal::FilterChanged { matched: 2 }]
        );
    }

    #[test]
    fn test_set_term_reports_change() {
        let mut stage = SearchStage::new(SignalBus::new());
        assert!(stage.set_term("a"));
        assert!(!stage.set_term("a"));
        assert_eq!(stage.state().term, "a");
    }
}
