//! Client-side pagination: page count, visible window, page clamping.
//!
//! [`Pagination`] holds `{total, page_size, current_page}`. Page numbers are
//! 1-based. Out-of-range pages are clamped, never rejected. With no page size
//! the whole collection is one page.

use std::ops::Range;

// ---------------------------------------------------------------------------
// PageWindow
// ---------------------------------------------------------------------------

/// The slice of the collection materialized for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// First visible row index.
    pub start: usize,
    /// One past the last visible row index.
    pub end: usize,
    /// Rows per page, `None` when pagination is disabled.
    pub page_size: Option<usize>,
    /// The page this window shows.
    pub page: usize,
    /// Total number of pages.
    pub page_count: usize,
}

impl PageWindow {
    /// Visible row indices.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether row `index` is visible.
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

// ---------------------------------------------------------------------------
// PageChange
// ---------------------------------------------------------------------------

/// A planned transition between two pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub from: usize,
    pub to: usize,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Pagination state for one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    total: usize,
    page_size: Option<usize>,
    current_page: usize,
}

impl Pagination {
    /// Create pagination over `total` rows. A page size of `None` or `0`
    /// disables pagination. Starts on page 1.
    pub fn new(total: usize, page_size: Option<usize>) -> Self {
        Self {
            total,
            page_size: page_size.filter(|&n| n > 0),
            current_page: 1,
        }
    }

    /// Whether rows are split into pages.
    pub fn is_enabled(&self) -> bool {
        self.page_size.is_some()
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Change the page size (`None`/`0` disables). The current page is re-clamped.
    pub fn set_page_size(&mut self, page_size: Option<usize>) {
        self.page_size = page_size.filter(|&n| n > 0);
        self.current_page = self.clamp(self.current_page);
    }

    /// Change the row count. The current page is re-clamped.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.current_page = self.clamp(self.current_page);
    }

    /// `ceil(total / page_size)`, at least 1. Always 1 when disabled.
    pub fn page_count(&self) -> usize {
        match self.page_size {
            Some(size) => self.total.div_ceil(size).max(1),
            None => 1,
        }
    }

    /// Clamp a page number into `[1, page_count]`.
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.page_count())
    }

    /// The window shown for `page` (after clamping).
    pub fn window(&self, page: usize) -> PageWindow {
        let page = self.clamp(page);
        let (start, end) = match self.page_size {
            Some(size) => {
                let start = ((page - 1) * size).min(self.total);
                (start, (start + size).min(self.total))
            }
            None => (0, self.total),
        };
        PageWindow {
            start,
            end,
            page_size: self.page_size,
            page,
            page_count: self.page_count(),
        }
    }

    /// The window of the current page.
    pub fn current_window(&self) -> PageWindow {
        self.window(self.current_page)
    }

    /// Plan a move to `target` (clamped).
    pub fn plan(&self, target: usize) -> PageChange {
        PageChange {
            from: self.current_page,
            to: self.clamp(target),
        }
    }

    /// Apply a planned move.
    pub fn apply(&mut self, change: PageChange) {
        self.current_page = self.clamp(change.to);
    }
}
