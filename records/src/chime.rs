//! Decides when a snapshot should play the notification sound.

#[cfg(test)]
#[path = "chime_test.rs"]
mod chime_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::record::Notification;

/// When the dashboard announces incoming records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundPolicy {
    /// Chime whenever a snapshot contains any notable record.
    EverySnapshot,
    /// Chime only when a record becomes notable that was not notable in the
    /// previous snapshot.
    #[default]
    NewArrivals,
    Off,
}

impl SoundPolicy {
    /// Parse the `SOUND_POLICY` setting.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "every_snapshot" => Some(Self::EverySnapshot),
            "new_arrivals" => Some(Self::NewArrivals),
            "off" => Some(Self::Off),
            _ => None,
        }
    }
}

/// Remembers which records were notable in the last snapshot.
///
/// Only the latest snapshot is kept, so memory follows the size of the loaded
/// collection. The first observed snapshot only primes the tracker so a page
/// load does not chime for the existing backlog.
#[derive(Clone, Debug, Default)]
pub struct ArrivalTracker {
    notable: HashSet<String>,
    primed: bool,
}

impl ArrivalTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `snapshot` and report whether it should chime under `policy`.
    pub fn observe(&mut self, policy: SoundPolicy, snapshot: &[Notification]) -> bool {
        let current: HashSet<String> =
            snapshot.iter().filter(|r| r.is_notable()).map(|r| r.id.clone()).collect();
        let fresh = current.iter().any(|id| !self.notable.contains(id));
        self.notable = current;
        let was_primed = std::mem::replace(&mut self.primed, true);

        match policy {
            SoundPolicy::Off => false,
            SoundPolicy::EverySnapshot => snapshot.iter().any(Notification::is_notable),
            SoundPolicy::NewArrivals => was_primed && fresh,
        }
    }

    /// Forget everything, e.g. after signing out.
    pub fn reset(&mut self) {
        self.notable.clear();
        self.primed = false;
    }
}
