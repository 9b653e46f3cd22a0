//! Fixed-size pagination over a filtered list.
//!
//! Pages are 1-based. An empty list has zero pages but the current page still
//! reads as 1 so range labels and controls stay well defined.

#[cfg(test)]
#[path = "paging_test.rs"]
mod paging_test;

use serde::{Deserialize, Serialize};

/// Selectable page sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::Five, PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    #[must_use]
    pub fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
        }
    }

    /// Map a raw number from a select control; unsupported sizes yield `None`.
    #[must_use]
    pub fn from_count(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.get() == count)
    }
}

/// Current page cursor and page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    size: PageSize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Pagination {
    #[must_use]
    pub fn new(size: PageSize) -> Self {
        Self { page: 1, size }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Back to page 1; used whenever the filter changes.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Change page size and return to page 1.
    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 1;
    }

    /// Jump to `page`, clamped to the valid range for `total` items.
    pub fn go_to(&mut self, page: usize, total: usize) {
        let last = page_count(total, self.size.get()).max(1);
        self.page = page.clamp(1, last);
    }

    pub fn next(&mut self, total: usize) {
        self.go_to(self.page + 1, total);
    }

    pub fn prev(&mut self, total: usize) {
        self.go_to(self.page.saturating_sub(1), total);
    }

    /// Pull the cursor back inside range after the list shrank.
    pub fn clamp(&mut self, total: usize) {
        self.go_to(self.page, total);
    }

    /// The items of the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let size = self.size.get();
        let start = (self.page - 1).saturating_mul(size).min(items.len());
        let end = start.saturating_add(size).min(items.len());
        &items[start..end]
    }

    /// 1-based inclusive range of items shown, or `None` for an empty list.
    #[must_use]
    pub fn range(&self, total: usize) -> Option<(usize, usize)> {
        let size = self.size.get();
        let first = (self.page - 1) * size + 1;
        if total == 0 || first > total {
            return None;
        }
        Some((first, (self.page * size).min(total)))
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self, total: usize) -> bool {
        self.page < page_count(total, self.size.get())
    }
}

/// Number of pages needed for `total` items: `ceil(total / size)`.
#[must_use]
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 { 0 } else { total.div_ceil(size) }
}

/// One entry of the page-number strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Compact page-number strip.
///
/// Up to five pages are listed in full. Longer lists show the first two and
/// last two pages, plus the current page with its neighbours, separated by
/// ellipses.
#[must_use]
pub fn page_items(pages: usize, current: usize) -> Vec<PageItem> {
    if pages <= 5 {
        return (1..=pages).map(PageItem::Page).collect();
    }

    let mut wanted: Vec<usize> = vec![1, 2, pages - 1, pages];
    for p in [current.saturating_sub(1), current, current + 1] {
        if (1..=pages).contains(&p) {
            wanted.push(p);
        }
    }
    wanted.sort_unstable();
    wanted.dedup();

    let mut items = Vec::with_capacity(wanted.len() + 2);
    let mut previous = 0;
    for p in wanted {
        if previous != 0 && p > previous + 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(p));
        previous = p;
    }
    items
}
