//! Pagination engine implementation

use super::derive::{corrected_page, derive, total_pages, Derived};
use super::{PageCursor, PaginationState, DEFAULT_ITEMS_PER_PAGE};

/// Page position and page size for one view
///
/// The owning view calls [`Paginator::paginate`] after every control call or
/// dataset change. Controls clamp against the dataset length seen by the most
/// recent `paginate` (or [`Paginator::set_total_items`]).
///
/// Every control returns whether the cursor actually moved.
#[derive(Debug, Clone)]
pub struct Paginator {
    cursor: PageCursor,
    total_items: usize,
}

impl Paginator {
    /// Create a paginator on page 1
    pub fn new(initial_items_per_page: usize) -> Self {
        if initial_items_per_page == 0 {
            tracing::warn!("Page size 0 requested, using 1");
        }

        Self {
            cursor: PageCursor::new(initial_items_per_page),
            total_items: 0,
        }
    }

    /// Recompute against `data`, applying auto-correction
    pub fn paginate<'a, T>(&mut self, data: &'a [T]) -> Derived<'a, T> {
        let derived = derive(self.cursor, data);

        if derived.corrected {
            tracing::debug!(
                "Page {} no longer exists ({} pages), back to page 1",
                self.cursor.current_page,
                derived.pagination.total_pages
            );
        }

        self.cursor = derived.pagination.cursor();
        self.total_items = derived.pagination.total_items;
        derived
    }

    /// Record a new dataset length without slicing
    ///
    /// Applies the same auto-correction rule as `paginate`. Returns true when
    /// the current page had to be reset.
    pub fn set_total_items(&mut self, total_items: usize) -> bool {
        self.total_items = total_items;
        let page = corrected_page(self.cursor.current_page, self.total_pages());
        self.move_to(page)
    }

    /// Current state snapshot
    pub fn state(&self) -> PaginationState {
        PaginationState {
            current_page: self.cursor.current_page,
            items_per_page: self.cursor.items_per_page,
            total_items: self.total_items,
            total_pages: self.total_pages(),
        }
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn current_page(&self) -> usize {
        self.cursor.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.cursor.items_per_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.cursor.items_per_page)
    }

    /// Jump to `page`, clamped into `[1, total_pages]` (1 when there are no pages)
    pub fn go_to_page(&mut self, page: i64) -> bool {
        let last = self.total_pages().max(1);
        let page = if page < 1 {
            1
        } else {
            usize::try_from(page).unwrap_or(usize::MAX).min(last)
        };
        self.move_to(page)
    }

    /// Advance one page unless already on the last one
    pub fn next_page(&mut self) -> bool {
        if self.cursor.current_page < self.total_pages() {
            self.move_to(self.cursor.current_page + 1)
        } else {
            false
        }
    }

    /// Go back one page unless already on the first one
    pub fn prev_page(&mut self) -> bool {
        if self.cursor.current_page > 1 {
            self.move_to(self.cursor.current_page - 1)
        } else {
            false
        }
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.move_to(1)
    }

    /// Jump to the last page, or page 1 when the dataset is empty
    pub fn go_to_last_page(&mut self) -> bool {
        let last = self.total_pages().max(1);
        self.move_to(last)
    }

    /// Change the page size and return to page 1
    ///
    /// A size of 0 is normalized to 1. Returns true when either the page size
    /// or the current page changed.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> bool {
        let items_per_page = items_per_page.max(1);
        let changed = self.cursor.items_per_page != items_per_page || self.cursor.current_page != 1;

        if self.cursor.items_per_page != items_per_page {
            tracing::debug!(
                "Page size {} -> {}",
                self.cursor.items_per_page,
                items_per_page
            );
        }

        self.cursor = PageCursor {
            current_page: 1,
            items_per_page,
        };
        changed
    }

    fn move_to(&mut self, page: usize) -> bool {
        if self.cursor.current_page == page {
            return false;
        }
        self.cursor.current_page = page;
        true
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_walk_to_last_page() {
        let data = items(25);
        let mut paginator = Paginator::new(10);
        paginator.paginate(&data);

        assert!(paginator.next_page());
        assert!(paginator.next_page());
        let page = paginator.paginate(&data);
        assert_eq!(page.pagination.current_page, 3);
        assert_eq!(page.items, &data[20..25]);

        // Already on the last page
        assert!(!paginator.next_page());
        let page = paginator.paginate(&data);
        assert_eq!(page.pagination.current_page, 3);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_prev_page_on_first_page_is_noop() {
        let data = items(25);
        let mut paginator = Paginator::new(10);
        let before = paginator.paginate(&data).pagination;

        assert!(!paginator.prev_page());
        assert_eq!(paginator.state(), before);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let data = items(25);
        let mut paginator = Paginator::new(10);
        paginator.paginate(&data);

        for (requested, expected) in [(-5, 1), (0, 1), (2, 2), (3, 3), (4, 3), (i64::MAX, 3)] {
            paginator.go_to_page(requested);
            assert_eq!(paginator.current_page(), expected, "requested {}", requested);
        }
    }

    #[test]
    fn test_go_to_page_beyond_single_page() {
        let data = items(7);
        let mut paginator = Paginator::new(10);
        paginator.paginate(&data);

        paginator.go_to_page(99);
        let page = paginator.paginate(&data);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.items.len(), 7);
    }

    #[test]
    fn test_go_to_page_on_empty_dataset() {
        let data: Vec<u8> = Vec::new();
        let mut paginator = Paginator::new(10);
        paginator.paginate(&data);

        paginator.go_to_page(4);
        assert_eq!(paginator.current_page(), 1);
        paginator.go_to_page(-4);
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn test_go_to_last_page_on_empty_dataset_stays_on_first() {
        let data: Vec<u8> = Vec::new();
        let mut paginator = Paginator::new(10);
        let page = paginator.paginate(&data);
        assert_eq!(page.pagination.total_pages, 0);

        assert!(!paginator.go_to_last_page());
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn test_first_and_last() {
        let data = items(42);
        let mut paginator = Paginator::new(10);
        paginator.paginate(&data);

        assert!(paginator.go_to_last_page());
        assert_eq!(paginator.current_page(), 5);
        assert_eq!(paginator.paginate(&data).items, &data[40..42]);

        assert!(paginator.go_to_first_page());
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn test_set_items_per_page_resets_to_first_page() {
        let data = items(30);
        let mut paginator = Paginator::new(10);
        paginator.paginate(&data);
        paginator.go_to_page(2);

        assert!(paginator.set_items_per_page(5));
        let page = paginator.paginate(&data);
        assert_eq!(page.pagination.items_per_page, 5);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_pages, 6);
        assert_eq!(page.items, &data[0..5]);
    }

    #[test]
    fn test_set_items_per_page_same_size_still_resets() {
        let data = items(30);
        let mut paginator = Paginator::new(10);
        paginator.paginate(&data);
        paginator.go_to_last_page();

        assert!(paginator.set_items_per_page(10));
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn test_zero_page_size_is_normalized() {
        let mut paginator = Paginator::new(0);
        assert_eq!(paginator.items_per_page(), 1);

        paginator.set_items_per_page(0);
        assert_eq!(paginator.items_per_page(), 1);
    }

    #[test]
    fn test_shrinking_dataset_resets_page() {
        let full = items(25);
        let mut paginator = Paginator::new(10);
        paginator.paginate(&full);
        paginator.go_to_last_page();
        assert_eq!(paginator.current_page(), 3);

        let shrunk = items(5);
        let page = paginator.paginate(&shrunk);
        assert!(page.corrected);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.items, &shrunk[..]);
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn test_set_total_items_applies_correction() {
        let mut paginator = Paginator::new(10);
        paginator.set_total_items(50);
        paginator.go_to_page(5);

        assert!(paginator.set_total_items(12));
        assert_eq!(paginator.current_page(), 1);
        assert_eq!(paginator.total_pages(), 2);

        // Nothing to correct when the page still exists
        paginator.go_to_page(2);
        assert!(!paginator.set_total_items(20));
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn test_state_matches_last_derivation() {
        let data = items(17);
        let mut paginator = Paginator::new(4);
        paginator.go_to_page(3);
        let page = paginator.paginate(&data);
        assert_eq!(paginator.state(), page.pagination);
    }
}
