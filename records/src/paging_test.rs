use super::*;

// =============================================================
// page_count
// =============================================================

#[test]
fn page_count_is_ceiling_division() {
    assert_eq!(page_count(0, 10), 0);
    assert_eq!(page_count(1, 10), 1);
    assert_eq!(page_count(10, 10), 1);
    assert_eq!(page_count(11, 10), 2);
    assert_eq!(page_count(101, 50), 3);
}

#[test]
fn page_count_matches_ceil_for_all_sizes() {
    for size in PageSize::ALL {
        let p = size.get();
        for n in 0..120 {
            let expected = (n + p - 1) / p;
            assert_eq!(page_count(n, p), expected, "n={n} p={p}");
        }
    }
}

// =============================================================
// PageSize
// =============================================================

#[test]
fn page_size_default_is_ten() {
    assert_eq!(PageSize::default().get(), 10);
}

#[test]
fn page_size_from_count_accepts_supported_sizes_only() {
    assert_eq!(PageSize::from_count(5), Some(PageSize::Five));
    assert_eq!(PageSize::from_count(50), Some(PageSize::Fifty));
    assert_eq!(PageSize::from_count(7), None);
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn slice_returns_requested_page() {
    let items: Vec<usize> = (1..=23).collect();
    let mut pages = Pagination::new(PageSize::Ten);
    assert_eq!(pages.slice(&items), &items[0..10]);
    pages.go_to(3, items.len());
    assert_eq!(pages.slice(&items), &[21, 22, 23]);
}

#[test]
fn last_page_never_exceeds_page_size() {
    for size in PageSize::ALL {
        for n in 1..80 {
            let items: Vec<usize> = (0..n).collect();
            let mut pages = Pagination::new(size);
            pages.go_to(page_count(n, size.get()), n);
            let last = pages.slice(&items);
            assert!(!last.is_empty());
            assert!(last.len() <= size.get());
        }
    }
}

#[test]
fn go_to_clamps_into_range() {
    let mut pages = Pagination::new(PageSize::Five);
    pages.go_to(99, 12);
    assert_eq!(pages.page(), 3);
    pages.go_to(0, 12);
    assert_eq!(pages.page(), 1);
}

#[test]
fn empty_list_stays_on_page_one() {
    let mut pages = Pagination::new(PageSize::Five);
    pages.go_to(4, 0);
    assert_eq!(pages.page(), 1);
    assert!(pages.slice::<u8>(&[]).is_empty());
    assert_eq!(pages.range(0), None);
    assert!(!pages.has_next(0));
    assert!(!pages.has_prev());
}

#[test]
fn reset_and_set_size_return_to_first_page() {
    let mut pages = Pagination::new(PageSize::Five);
    pages.go_to(3, 40);
    pages.reset();
    assert_eq!(pages.page(), 1);

    pages.go_to(3, 40);
    pages.set_size(PageSize::Twenty);
    assert_eq!(pages.page(), 1);
    assert_eq!(pages.size(), PageSize::Twenty);
}

#[test]
fn next_and_prev_step_within_bounds() {
    let mut pages = Pagination::new(PageSize::Ten);
    pages.prev(25);
    assert_eq!(pages.page(), 1);
    pages.next(25);
    pages.next(25);
    pages.next(25);
    assert_eq!(pages.page(), 3);
    assert!(pages.has_prev());
    assert!(!pages.has_next(25));
}

#[test]
fn clamp_pulls_back_after_list_shrinks() {
    let mut pages = Pagination::new(PageSize::Ten);
    pages.go_to(4, 40);
    pages.clamp(12);
    assert_eq!(pages.page(), 2);
}

#[test]
fn range_reports_inclusive_bounds() {
    let mut pages = Pagination::new(PageSize::Ten);
    assert_eq!(pages.range(23), Some((1, 10)));
    pages.go_to(3, 23);
    assert_eq!(pages.range(23), Some((21, 23)));
}

// =============================================================
// page_items
// =============================================================

#[test]
fn page_items_lists_all_pages_up_to_five() {
    assert_eq!(page_items(0, 1), Vec::<PageItem>::new());
    assert_eq!(
        page_items(3, 2),
        vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]
    );
}

#[test]
fn page_items_compacts_long_lists_at_start() {
    assert_eq!(
        page_items(10, 1),
        vec![PageItem::Page(1), PageItem::Page(2), PageItem::Ellipsis, PageItem::Page(9), PageItem::Page(10)]
    );
}

#[test]
fn page_items_shows_current_neighbourhood_in_middle() {
    assert_eq!(
        page_items(10, 5),
        vec![
            PageItem::Page(1),
            PageItem::Page(2),
            PageItem::Ellipsis,
            PageItem::Page(4),
            PageItem::Page(5),
            PageItem::Page(6),
            PageItem::Ellipsis,
            PageItem::Page(9),
            PageItem::Page(10),
        ]
    );
}

#[test]
fn page_items_merges_adjacent_runs() {
    assert_eq!(
        page_items(6, 3),
        vec![
            PageItem::Page(1),
            PageItem::Page(2),
            PageItem::Page(3),
            PageItem::Page(4),
            PageItem::Page(5),
            PageItem::Page(6),
        ]
    );
}
