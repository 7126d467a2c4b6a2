//! Client-side pagination over ordered datasets
//!
//! A view hands the engine the full, already filtered and sorted dataset and
//! gets back the slice for the active page together with a snapshot of the
//! page state. Nothing here ever fails: out-of-range input is clamped.

use serde::{Serialize, Deserialize};

mod derive;
mod engine;

#[cfg(test)]
mod property;

pub use derive::{derive, page_range, total_pages, Derived};
pub use engine::Paginator;

/// Page size used when a view does not ask for one
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// The mutable part of the pagination state
///
/// This is what a view actually owns. Everything else in
/// [`PaginationState`] is derived from it and the dataset length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// 1-indexed active page
    pub current_page: usize,

    /// Number of items per page, always > 0
    pub items_per_page: usize,
}

impl PageCursor {
    /// Cursor on the first page with the given page size
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Snapshot of the pagination state after a recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PaginationState {
    /// Whether `next_page` would move
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether `prev_page` would move
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// 0-based index of the first item on the current page, clipped to the dataset
    pub fn start_index(&self) -> usize {
        page_range(self.current_page, self.items_per_page, self.total_items).start
    }

    /// 0-based exclusive end of the current page, clipped to the dataset
    pub fn end_index(&self) -> usize {
        page_range(self.current_page, self.items_per_page, self.total_items).end
    }

    /// Number of items visible on the current page
    pub fn visible_items(&self) -> usize {
        self.end_index() - self.start_index()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Cursor part of this snapshot
    pub fn cursor(&self) -> PageCursor {
        PageCursor {
            current_page: self.current_page,
            items_per_page: self.items_per_page,
        }
    }
}
