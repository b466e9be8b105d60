//! Pagination stage: page position, page size and slicing
//!
//! The stage only sees the length of the working view; it never looks at
//! search or sort state directly. It learns that the result set changed
//! (new search results or a new data set) through its [`SignalReceiver`]
//! and jumps back to page 1 on the next [`sync`](PaginationStage::sync).

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::debug;

use crate::bus::{SignalReceiver, TableSignal};
use crate::page::{page_buttons, page_range, total_pages, PageButton};
use crate::value::Row;

/// Page position and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// 1-based
    pub current_page: usize,
    /// `None` shows every row on a single page
    pub rows_per_page: Option<NonZeroUsize>,
    pub rows_per_page_options: Vec<usize>,
}

impl PaginationState {
    /// Start on page 1 with the first option as page size.
    pub fn new(rows_per_page_options: Vec<usize>) -> Self {
        let rows_per_page = rows_per_page_options
            .first()
            .copied()
            .and_then(NonZeroUsize::new);
        Self {
            current_page: 1,
            rows_per_page,
            rows_per_page_options,
        }
    }
}

/// One page of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub slice: &'a [Row],
    pub total_pages: usize,
    pub page_buttons: Vec<PageButton>,
}

/// Slice `rows` to the page described by `state`.
///
/// ```
/// use std::num::NonZeroUsize;
/// use datatable_core::pagination::{paginate, PaginationState};
/// use datatable_core::Row;
///
/// let rows: Vec<Row> = (0..42).map(|i| Row::new().with("id", i)).collect();
/// let mut state = PaginationState::new(vec![10]);
/// state.current_page = 5;
/// let page = paginate(&rows, &state);
/// assert_eq!(page.slice.len(), 2);
/// assert_eq!(page.total_pages, 5);
/// ```
pub fn paginate<'a>(rows: &'a [Row], state: &PaginationState) -> PageView<'a> {
    let total = total_pages(rows.len(), state.rows_per_page);
    let range = page_range(rows.len(), state.rows_per_page, state.current_page);
    PageView {
        slice: &rows[range],
        total_pages: total,
        page_buttons: page_buttons(state.current_page.min(total), total),
    }
}

/// Footer data for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub current_page: usize,
    pub total_pages: usize,
    pub rows_per_page: Option<usize>,
    pub rows_per_page_options: Vec<usize>,
    pub page_buttons: Vec<PageButton>,
    /// Rows on the current page
    pub visible_count: usize,
    /// Rows in the searched and sorted view
    pub total_count: usize,
    /// Rows in the baseline data set
    pub initial_count: usize,
    /// 1-based position of the first visible row, 0 when nothing is visible
    pub first_entry: usize,
    pub last_entry: usize,
}

impl fmt::Display for PaginationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visible_count == 0 {
            write!(
                f,
                "Showing 0 entries (filtered from {} entries)",
                self.initial_count
            )
        } else {
            write!(
                f,
                "Showing {} to {} of {} entries",
                self.first_entry, self.last_entry, self.total_count
            )
        }
    }
}

/// Owns [`PaginationState`] and reacts to result-set changes.
#[derive(Debug)]
pub struct PaginationStage {
    state: PaginationState,
    enabled: bool,
    view_len: usize,
    signals: SignalReceiver,
}

impl PaginationStage {
    /// Create a stage on page 1 that listens on `signals`
    pub fn new(rows_per_page_options: Vec<usize>, signals: SignalReceiver) -> Self {
        Self {
            state: PaginationState::new(rows_per_page_options),
            enabled: true,
            view_len: 0,
            signals,
        }
    }

    /// Get a reference to the stored pagination state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Whether rows are sliced into pages
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switching pagination off shows every row on one page.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.clamp();
    }

    /// Page size in effect, `None` when pagination is off or unsized.
    pub fn rows_per_page(&self) -> Option<NonZeroUsize> {
        self.state.rows_per_page.filter(|_| self.enabled)
    }

    /// 1-based page currently shown
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Page count for the last synced view; at least 1
    pub fn total_pages(&self) -> usize {
        total_pages(self.view_len, self.rows_per_page())
    }

    /// Catch up with the working view.
    ///
    /// Drains pending signals, resets to page 1 when the result set changed
    /// and keeps the current page within bounds. Returns `true` if the page
    /// moved.
    pub fn sync(&mut self, view_len: usize) -> bool {
        self.view_len = view_len;
        let before = self.state.current_page;

        let drained = self.signals.drain();
        let reset = drained.lagged
            || drained.signals.iter().any(|signal| {
                matches!(
                    signal,
                    TableSignal::FilterChanged { .. } | TableSignal::DataReplaced { .. }
                )
            });
        if reset && self.state.current_page != 1 {
            debug!(from = self.state.current_page, "Result set changed, back to page 1");
            self.state.current_page = 1;
        }
        self.clamp();
        self.state.current_page != before
    }

    fn clamp(&mut self) {
        let total = self.total_pages();
        self.state.current_page = self.state.current_page.clamp(1, total);
    }

    /// Jump to `page`; ignored outside `1..=total_pages`.
    pub fn select_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        if page < 1 || page > total {
            debug!(page, total, "Page out of range, ignored");
            return false;
        }
        if page == self.state.current_page {
            return false;
        }
        self.state.current_page = page;
        true
    }

    /// Next page. No-op on the last page.
    pub fn increment(&mut self) -> bool {
        if self.state.current_page >= self.total_pages() {
            return false;
        }
        self.state.current_page += 1;
        true
    }

    /// Previous page. No-op on page 1.
    pub fn decrement(&mut self) -> bool {
        if self.state.current_page <= 1 {
            return false;
        }
        self.state.current_page -= 1;
        true
    }

    /// Change the page size and go back to page 1.
    ///
    /// Zero and the current size are ignored.
    pub fn change_rows_per_page(&mut self, rows_per_page: usize) -> bool {
        let Some(size) = NonZeroUsize::new(rows_per_page) else {
            debug!("Zero rows per page rejected");
            return false;
        };
        if self.state.rows_per_page == Some(size) {
            return false;
        }
        self.state.rows_per_page = Some(size);
        self.state.current_page = 1;
        true
    }

    /// With a page, whether it is the current one. Without, whether the
    /// current page is the last one (or there is nothing to page through).
    pub fn is_active(&self, page: Option<usize>) -> bool {
        match page {
            Some(page) => page == self.state.current_page,
            None => self.view_len == 0 || self.state.current_page >= self.total_pages(),
        }
    }

    fn effective_state(&self) -> PaginationState {
        PaginationState {
            rows_per_page: self.rows_per_page(),
            ..self.state.clone()
        }
    }

    /// Current page of `rows`, the view this stage was last synced to.
    pub fn view<'a>(&self, rows: &'a [Row]) -> PageView<'a> {
        paginate(rows, &self.effective_state())
    }

    /// Footer data for `rows`, the current view
    pub fn summary(&self, rows: &[Row], initial_count: usize) -> PaginationSummary {
        let view = self.view(rows);
        let visible_count = view.slice.len();
        let first_entry = if visible_count == 0 {
            0
        } else {
            page_range(rows.len(), self.rows_per_page(), self.state.current_page).start + 1
        };
        let last_entry = (first_entry + visible_count).saturating_sub(1);

        PaginationSummary {
            current_page: self.state.current_page,
            total_pages: view.total_pages,
            rows_per_page: self.rows_per_page().map(NonZeroUsize::get),
            rows_per_page_options: self.state.rows_per_page_options.clone(),
            page_buttons: view.page_buttons,
            visible_count,
            total_count: rows.len(),
            initial_count,
            first_entry,
            last_entry,
        }
    }
}
