//! Page arithmetic and page-button compression

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use serde::{Serialize, Serializer};

/// Up to this many pages, every page gets its own button.
pub const MAX_UNCOMPRESSED_PAGES: usize = 5;

/// One entry of the page navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Serializes as a bare page number or the `"…"` marker.
impl Serialize for PageButton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageButton::Page(n) => serializer.serialize_u64(*n as u64),
            PageButton::Ellipsis => serializer.serialize_str("…"),
        }
    }
}

impl PageButton {
    /// Page number, or `None` for an ellipsis
    pub fn page(&self) -> Option<usize> {
        match self {
            PageButton::Page(n) => Some(*n),
            PageButton::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageButton::Page(n) => write!(f, "{n}"),
            PageButton::Ellipsis => f.write_str("…"),
        }
    }
}

/// Number of pages needed for `len` rows; never less than 1.
///
/// Without a page size there is a single page holding everything.
pub fn total_pages(len: usize, rows_per_page: Option<NonZeroUsize>) -> usize {
    match rows_per_page {
        Some(rpp) => len.div_ceil(rpp.get()).max(1),
        None => 1,
    }
}

/// Index range of `page` (1-based) within `len` rows, clamped to the data.
pub fn page_range(len: usize, rows_per_page: Option<NonZeroUsize>, page: usize) -> Range<usize> {
    let Some(rpp) = rows_per_page else {
        return 0..len;
    };
    let start = page.saturating_sub(1).saturating_mul(rpp.get()).min(len);
    let end = start.saturating_add(rpp.get()).min(len);
    start..end
}

/// Visible navigation buttons for `current` out of `total` pages.
///
/// First, last and current page are always present; long runs collapse
/// into a single ellipsis on each side.
///
/// ```
/// use datatable_core::page::{page_buttons, PageButton::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_buttons(10, 20),
///     vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
/// );
/// ```
pub fn page_buttons(current: usize, total: usize) -> Vec<PageButton> {
    use PageButton::{Ellipsis, Page};

    let total = total.max(1);
    if total <= MAX_UNCOMPRESSED_PAGES {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total)]
    } else if current >= total - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]
    }
}
