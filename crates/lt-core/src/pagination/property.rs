use super::{derive, total_pages, PageCursor, Paginator};
use proptest::prelude::*;

fn items(n: usize) -> Vec<usize> {
    (0..n).collect()
}

fn arb_len() -> impl Strategy<Value = usize> {
    prop_oneof![Just(0usize), 1usize..40, 40usize..2_000]
}

fn arb_page_size() -> impl Strategy<Value = usize> {
    prop_oneof![1usize..15, 15usize..300]
}

/// A page request anywhere in `i64`, biased toward the interesting edges
fn arb_page() -> impl Strategy<Value = i64> {
    prop_oneof![any::<i64>(), -3i64..250, Just(i64::MIN), Just(i64::MAX)]
}

proptest! {
    #[test]
    fn slice_length_matches_page_position(len in arb_len(), size in arb_page_size(), seed in any::<usize>()) {
        let data = items(len);
        let pages = total_pages(len, size);
        prop_assert_eq!(pages, (len + size - 1) / size);

        if pages == 0 {
            let derived = derive(PageCursor::new(size), &data);
            prop_assert!(derived.items.is_empty());
            prop_assert!(derived.pagination.is_empty());
            return Ok(());
        }

        let page = 1 + seed % pages;
        let derived = derive(PageCursor { current_page: page, items_per_page: size }, &data);
        let start = (page - 1) * size;

        prop_assert!(!derived.corrected);
        prop_assert_eq!(derived.items.len(), size.min(len - start));
        prop_assert_eq!(derived.items.first().copied(), Some(start));
    }

    #[test]
    fn go_to_page_lands_in_range(len in arb_len(), size in arb_page_size(), page in arb_page()) {
        let mut paginator = Paginator::new(size);
        paginator.set_total_items(len);
        paginator.go_to_page(page);

        let last = paginator.total_pages().max(1);
        let current = paginator.current_page();
        prop_assert!((1..=last).contains(&current));
        if page >= 1 && (page as u64) <= last as u64 {
            prop_assert_eq!(current as u64, page as u64);
        }
    }

    #[test]
    fn next_and_prev_stop_at_the_ends(len in arb_len(), size in arb_page_size()) {
        let mut paginator = Paginator::new(size);
        paginator.set_total_items(len);

        paginator.go_to_last_page();
        let last = paginator.current_page();
        prop_assert_eq!(last, paginator.total_pages().max(1));
        prop_assert!(!paginator.next_page());
        prop_assert_eq!(paginator.current_page(), last);
        prop_assert!(paginator.state().is_last_page());

        paginator.go_to_first_page();
        prop_assert!(!paginator.prev_page());
        prop_assert_eq!(paginator.current_page(), 1);
        prop_assert!(paginator.state().is_first_page());
    }

    #[test]
    fn set_items_per_page_returns_to_first_page(
        len in arb_len(),
        size in arb_page_size(),
        page in arb_page(),
        new_size in 0usize..300,
    ) {
        let mut paginator = Paginator::new(size);
        paginator.set_total_items(len);
        paginator.go_to_page(page);

        paginator.set_items_per_page(new_size);
        prop_assert_eq!(paginator.current_page(), 1);
        prop_assert_eq!(paginator.items_per_page(), new_size.max(1));
    }

    #[test]
    fn shrinking_dataset_keeps_page_valid(
        len in arb_len(),
        removed in 0usize..2_000,
        size in arb_page_size(),
        page in arb_page(),
    ) {
        let data = items(len);
        let mut paginator = Paginator::new(size);
        paginator.paginate(&data);
        paginator.go_to_page(page);
        let before = paginator.current_page();

        let shrunk = &data[..len.saturating_sub(removed)];
        let derived = paginator.paginate(shrunk);
        let pages = derived.pagination.total_pages;
        let current = derived.pagination.current_page;

        prop_assert_eq!(pages, total_pages(shrunk.len(), size));
        if pages > 0 {
            prop_assert!((1..=pages).contains(&current));
            if before > pages {
                prop_assert!(derived.corrected);
                prop_assert_eq!(current, 1);
            } else {
                prop_assert_eq!(current, before);
            }
        } else {
            prop_assert!(derived.items.is_empty());
        }
        prop_assert_eq!(paginator.current_page(), current);
    }
}
