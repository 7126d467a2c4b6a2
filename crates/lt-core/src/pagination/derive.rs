//! Pure derivation of the visible page

use std::ops::Range;

use super::{PageCursor, PaginationState};

/// Result of one recomputation pass
#[derive(Debug)]
pub struct Derived<'a, T> {
    /// Items on the current page
    pub items: &'a [T],

    /// State the slice was cut with
    pub pagination: PaginationState,

    /// Set when the incoming cursor pointed past the last page and was reset
    pub corrected: bool,
}

impl<'a, T> Clone for Derived<'a, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            pagination: self.pagination,
            corrected: self.corrected,
        }
    }
}

/// `ceil(total_items / items_per_page)`, treating a zero page size as 1
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// Half-open index range of `page` (1-indexed), clipped to `len`
pub fn page_range(page: usize, items_per_page: usize, len: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(items_per_page)
        .min(len);
    let end = start.saturating_add(items_per_page).min(len);
    start..end
}

/// Page to land on once the dataset has `total_pages` pages
///
/// A page past the end resets to 1. With zero pages the cursor is left where
/// it was, the slice is empty either way.
pub(crate) fn corrected_page(current_page: usize, total_pages: usize) -> usize {
    if total_pages > 0 && current_page > total_pages {
        1
    } else {
        current_page.max(1)
    }
}

/// Derive the visible slice and state snapshot for `cursor` over `data`
///
/// Auto-correction happens in this same pass, so the returned slice and
/// `pagination` always agree with each other.
pub fn derive<T>(cursor: PageCursor, data: &[T]) -> Derived<'_, T> {
    let items_per_page = cursor.items_per_page.max(1);
    let total_items = data.len();
    let total_pages = total_pages(total_items, items_per_page);

    let current_page = corrected_page(cursor.current_page, total_pages);
    let corrected = current_page != cursor.current_page;

    let range = page_range(current_page, items_per_page, total_items);

    Derived {
        items: &data[range],
        pagination: PaginationState {
            current_page,
            items_per_page,
            total_items,
            total_pages,
        },
        corrected,
    }
}
