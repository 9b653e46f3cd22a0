//! Record list view model.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds the latest snapshot of visible records plus the operator's filter,
//! pagination and violation-value drafts. Snapshots replace the list
//! wholesale; local mutations are applied optimistically and never rolled
//! back, so the list may diverge from the store until the next snapshot.
//!
//! DESIGN
//! ======
//! All derivations (stats, filtering, paging) are recomputed from `records`
//! so no cached value can go stale. Presence is passed in as a lookup because
//! it lives in its own state.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use std::collections::HashMap;

use records::filter::{self, FilterState, Tab};
use records::paging::{PageItem, PageSize, Pagination, page_count, page_items};
use records::presence::PresenceStatus;
use records::stats::Stats;
use records::{Notification, Status};

#[derive(Clone, Debug)]
pub struct NotificationsState {
    /// Visible records, newest first.
    pub records: Vec<Notification>,
    pub stats: Stats,
    pub filter: FilterState,
    pub pagination: Pagination,
    /// Violation-value editor contents keyed by record id.
    pub violation_drafts: HashMap<String, String>,
    /// True until the first snapshot or failure.
    pub loading: bool,
    /// True while a manual refresh is in flight.
    pub refreshing: bool,
    /// True after a failed query until the next snapshot.
    pub failing: bool,
}

impl Default for NotificationsState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            stats: Stats::default(),
            filter: FilterState::default(),
            pagination: Pagination::default(),
            violation_drafts: HashMap::new(),
            loading: true,
            refreshing: false,
            failing: false,
        }
    }
}

/// The current page as rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub rows: Vec<Notification>,
    pub filtered_total: usize,
    pub page: usize,
    pub pages: usize,
    /// 1-based inclusive bounds of `rows` within the filtered list.
    pub range: Option<(usize, usize)>,
    pub items: Vec<PageItem>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl NotificationsState {
    #[must_use]
    pub fn with_page_size(size: PageSize) -> Self {
        Self { pagination: Pagination::new(size), ..Self::default() }
    }

    /// Replace the list with a snapshot.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Notification>) {
        self.records = snapshot.into_iter().filter(|r| !r.hidden).collect();
        records::record::sort_newest_first(&mut self.records);
        self.violation_drafts = self
            .records
            .iter()
            .map(|r| (r.id.clone(), r.violation_value.clone().unwrap_or_default()))
            .collect();
        self.refresh_stats();
        self.pagination.clamp(self.records.len());
        self.loading = false;
        self.refreshing = false;
        self.failing = false;
    }

    /// Record a failed query. Returns true for the first failure of a streak.
    pub fn subscription_failed(&mut self) -> bool {
        self.loading = false;
        self.refreshing = false;
        let first = !self.failing;
        self.failing = true;
        first
    }

    /// Remove one record locally; used before the hide write is sent.
    pub fn remove(&mut self, id: &str) -> Option<Notification> {
        let index = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(index);
        self.violation_drafts.remove(id);
        self.refresh_stats();
        Some(removed)
    }

    /// Drop every record after a successful hide-all.
    pub fn clear(&mut self) {
        self.records.clear();
        self.violation_drafts.clear();
        self.refresh_stats();
        self.pagination.reset();
    }

    /// Update the local copy after a stored status change.
    pub fn set_status(&mut self, id: &str, status: Status) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    /// Edit the draft without touching the record.
    pub fn set_violation_draft(&mut self, id: &str, value: String) {
        self.violation_drafts.insert(id.to_owned(), value);
    }

    /// Apply a violation value locally before it is written.
    pub fn set_violation_value(&mut self, id: &str, value: &str) {
        self.violation_drafts.insert(id.to_owned(), value.to_owned());
        if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
            record.violation_value = if value.is_empty() { None } else { Some(value.to_owned()) };
        }
    }

    #[must_use]
    pub fn violation_draft(&self, id: &str) -> String {
        self.violation_drafts.get(id).cloned().unwrap_or_default()
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.filter.tab = tab;
        self.pagination.reset();
    }

    pub fn set_online_only(&mut self, on: bool) {
        self.filter.online_only = on;
        self.pagination.reset();
    }

    pub fn set_card_only(&mut self, on: bool) {
        self.filter.card_only = on;
        self.pagination.reset();
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.pagination.set_size(size);
    }

    pub fn go_to_page(&mut self, page: usize, filtered_total: usize) {
        self.pagination.go_to(page, filtered_total);
    }

    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Notification> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records passing the current filter, in list order.
    pub fn filtered<P>(&self, presence: P) -> Vec<&Notification>
    where
        P: Fn(&str) -> PresenceStatus,
    {
        filter::apply(&self.records, &self.filter, presence)
    }

    /// Filter, then page. The page cursor is clamped to the filtered size.
    pub fn page_view<P>(&self, presence: P) -> PageView
    where
        P: Fn(&str) -> PresenceStatus,
    {
        let filtered = self.filtered(presence);
        let total = filtered.len();
        let mut pagination = self.pagination;
        pagination.clamp(total);
        let pages = page_count(total, pagination.size().get());
        PageView {
            rows: pagination.slice(&filtered).iter().map(|r| (*r).clone()).collect(),
            filtered_total: total,
            page: pagination.page(),
            pages,
            range: pagination.range(total),
            items: page_items(pages, pagination.page()),
            has_prev: pagination.has_prev(),
            has_next: pagination.has_next(total),
        }
    }

    fn refresh_stats(&mut self) {
        self.stats = Stats::from_records(&self.records);
    }
}
