//! Pagination math for the catalog view.

use crate::defaults;

/// Number of pages needed for `total` results at `page_size` per page.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Visible page controls derived from the current page and total page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current: u32,
    pub total_pages: u32,
    /// Consecutive page numbers around the current page.
    pub pages: Vec<u32>,
    /// Show a shortcut to page 1 before the window.
    pub show_first: bool,
    pub leading_ellipsis: bool,
    /// Show a shortcut to the last page after the window.
    pub show_last: bool,
    pub trailing_ellipsis: bool,
}

impl PageWindow {
    /// Window of at most [`defaults::PAGE_WINDOW`] pages.
    pub fn new(current: u32, total_pages: u32) -> Self {
        Self::with_width(current, total_pages, defaults::PAGE_WINDOW)
    }

    /// Window of at most `width` consecutive pages, centered on `current`
    /// as closely as the bounds allow.
    pub fn with_width(current: u32, total_pages: u32, width: u32) -> Self {
        if total_pages == 0 || width == 0 {
            return Self {
                current,
                total_pages,
                pages: Vec::new(),
                show_first: false,
                leading_ellipsis: false,
                show_last: false,
                trailing_ellipsis: false,
            };
        }

        let current = current.clamp(1, total_pages);
        let mut start = current.saturating_sub(width / 2).max(1);
        let end = total_pages.min(start.saturating_add(width - 1));
        if end - start + 1 < width {
            start = end.saturating_sub(width - 1).max(1);
        }

        Self {
            current,
            total_pages,
            pages: (start..=end).collect(),
            show_first: start > 1,
            leading_ellipsis: start > 2,
            show_last: end < total_pages,
            trailing_ellipsis: end.saturating_add(1) < total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }
}
