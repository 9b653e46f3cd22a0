//! Aggregate counters shown in the dashboard header cards.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use crate::record::Notification;

/// Counters recomputed on every snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Visible (non-hidden) records.
    pub total: usize,
    /// Visible records carrying a card number.
    pub with_card: usize,
}

impl Stats {
    #[must_use]
    pub fn from_records(records: &[Notification]) -> Self {
        Self {
            total: records.len(),
            with_card: records.iter().filter(|r| r.has_card_number()).count(),
        }
    }
}
