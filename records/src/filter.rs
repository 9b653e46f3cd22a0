//! Tab and toggle filtering over the loaded record list.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use crate::presence::PresenceStatus;
use crate::record::Notification;

/// Top-level list tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    All,
    Online,
    Cards,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::All, Tab::Online, Tab::Cards];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Online => "Online",
            Self::Cards => "Cards",
        }
    }
}

/// Active tab plus the two intersecting toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub tab: Tab,
    pub online_only: bool,
    pub card_only: bool,
}

impl FilterState {
    /// Number of toggles switched on, for the filter button badge.
    #[must_use]
    pub fn active_toggles(&self) -> usize {
        usize::from(self.online_only) + usize::from(self.card_only)
    }

    /// True when the result may differ from the unfiltered list.
    #[must_use]
    pub fn is_narrowing(&self) -> bool {
        self.tab != Tab::All || self.online_only || self.card_only
    }

    /// Whether `record` passes every active predicate.
    pub fn matches<P>(&self, record: &Notification, presence: &P) -> bool
    where
        P: Fn(&str) -> PresenceStatus,
    {
        let online = || presence(&record.id) == PresenceStatus::Online;
        let tab_ok = match self.tab {
            Tab::All => true,
            Tab::Online => online(),
            Tab::Cards => record.has_card_number(),
        };
        tab_ok && (!self.online_only || online()) && (!self.card_only || record.has_card_number())
    }
}

/// Keep the records that satisfy `filter`, preserving order.
pub fn apply<'a, P>(records: &'a [Notification], filter: &FilterState, presence: P) -> Vec<&'a Notification>
where
    P: Fn(&str) -> PresenceStatus,
{
    records.iter().filter(|r| filter.matches(r, &presence)).collect()
}
