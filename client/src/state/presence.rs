//! Presence subscriptions and their mirrored values.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every visible row shows a presence badge and the "Online" filter needs the
//! presence of every loaded record. Opening one stream per row would open the
//! same path many times, so streams are shared through a ref-counted
//! [`SubscriptionRegistry`]: the first holder of a key opens it, the last
//! release closes it.
//!
//! DESIGN
//! ======
//! The registry is generic over the handle type so its counting is testable
//! without a browser. Stream handles are not `Send` and live in a local stored
//! value; the mirrored trees are plain data in [`PresenceState`].

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use records::presence::{PresenceKey, PresenceStatus, PresenceTree};

use crate::net::rtdb::StreamEvent;

struct Entry<H> {
    refs: usize,
    handle: H,
}

/// Ref-counted set of open subscriptions keyed by `K`.
pub struct SubscriptionRegistry<K, H> {
    entries: HashMap<K, Entry<H>>,
}

impl<K, H> Default for SubscriptionRegistry<K, H> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<K: Eq + Hash + Clone, H> SubscriptionRegistry<K, H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a reference to `key`, calling `open` only if nobody holds it.
    ///
    /// # Errors
    ///
    /// Propagates `open`'s error; the key is then left unregistered.
    pub fn acquire<E, F>(&mut self, key: &K, open: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<H, E>,
    {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.refs += 1;
            return Ok(());
        }
        let handle = open()?;
        self.entries.insert(key.clone(), Entry { refs: 1, handle });
        Ok(())
    }

    /// Drop a reference. Returns the handle when this was the last one.
    pub fn release(&mut self, key: &K) -> Option<H> {
        let entry = self.entries.get_mut(key)?;
        entry.refs -= 1;
        if entry.refs > 0 {
            return None;
        }
        self.entries.remove(key).map(|e| e.handle)
    }

    #[cfg(test)]
    fn ref_count(&self, key: &K) -> usize {
        self.entries.get(key).map_or(0, |e| e.refs)
    }

    /// Number of distinct open subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Swap the handle of a held `key`, keeping its holders. Returns the old
    /// handle, or `None` when nobody holds `key`.
    pub fn replace(&mut self, key: &K, handle: H) -> Option<H> {
        self.entries.get_mut(key).map(|e| std::mem::replace(&mut e.handle, handle))
    }

    /// Reopen every held key through `open`, dropping the previous handles.
    pub fn replace_all<F>(&mut self, mut open: F)
    where
        F: FnMut(&K) -> H,
    {
        for (key, entry) in &mut self.entries {
            entry.handle = open(key);
        }
    }

    /// Drop every subscription regardless of holders.
    pub fn clear(&mut self) -> Vec<H> {
        self.entries.drain().map(|(_, e)| e.handle).collect()
    }
}

/// Mirrored presence per subscribed key.
#[derive(Clone, Debug, Default)]
pub struct PresenceState {
    trees: HashMap<PresenceKey, PresenceTree>,
}

impl PresenceState {
    /// Apply one stream event to the tree of `key`.
    ///
    /// Returns `false` when the stream was terminated by the server. The
    /// mirrored value is then dropped so readers see `Unknown` until the key
    /// is reopened.
    pub fn apply(&mut self, key: &PresenceKey, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Put { path, data } => {
                self.trees.entry(key.clone()).or_default().put(&path, data);
                true
            }
            StreamEvent::Patch { path, data } => {
                self.trees.entry(key.clone()).or_default().patch(&path, data);
                true
            }
            StreamEvent::KeepAlive => true,
            StreamEvent::Cancel(_) | StreamEvent::AuthRevoked => {
                self.trees.remove(key);
                false
            }
        }
    }

    pub fn forget(&mut self, key: &PresenceKey) {
        self.trees.remove(key);
    }

    pub fn clear(&mut self) {
        self.trees.clear();
    }

    /// Presence of record `id`; `Unknown` until a value has been seen.
    #[must_use]
    pub fn status(&self, id: &str) -> PresenceStatus {
        self.trees
            .get(&PresenceKey::Record(id.to_owned()))
            .map_or(PresenceStatus::Unknown, PresenceTree::status)
    }

    /// Online users under the roster subscription.
    #[must_use]
    pub fn online_count(&self) -> usize {
        self.trees.get(&PresenceKey::Roster).map_or(0, PresenceTree::online_count)
    }
}

/// Ids to acquire and release when the loaded id set changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// Compare id lists, keeping `next` order for additions and `previous` order
/// for removals.
#[must_use]
pub fn diff_ids(previous: &[String], next: &[String]) -> IdDiff {
    let before: HashSet<&String> = previous.iter().collect();
    let after: HashSet<&String> = next.iter().collect();
    IdDiff {
        added: next.iter().filter(|id| !before.contains(id)).cloned().collect(),
        removed: previous.iter().filter(|id| !after.contains(id)).cloned().collect(),
    }
}

/// True when the bearer token changed to a new value, so open streams must
/// be reopened with it.
#[must_use]
pub fn token_rotated(previous: Option<&str>, next: Option<&str>) -> bool {
    next.is_some() && previous != next
}

#[cfg(feature = "hydrate")]
pub use hub::PresenceHub;

#[cfg(feature = "hydrate")]
mod hub {
    use std::convert::Infallible;

    use leptos::prelude::*;
    use records::presence::PresenceKey;

    use super::{PresenceState, SubscriptionRegistry};
    use crate::net::rtdb::{self, PresenceStream};

    /// Held stream; `None` while the key waits for a usable token or after
    /// the server ended the stream.
    type Slot = Option<PresenceStream>;

    /// Context handle pairing the stream registry with the mirrored values.
    #[derive(Clone, Copy)]
    pub struct PresenceHub {
        pub state: RwSignal<PresenceState>,
        registry: StoredValue<SubscriptionRegistry<PresenceKey, Slot>, LocalStorage>,
    }

    impl PresenceHub {
        #[must_use]
        pub fn new(state: RwSignal<PresenceState>) -> Self {
            Self { state, registry: StoredValue::new_local(SubscriptionRegistry::new()) }
        }

        fn open_stream(&self, key: &PresenceKey, database_root: &str, id_token: Option<&str>) -> Slot {
            let id_token = id_token?;
            let url = rtdb::stream_url(database_root, &key.path(), id_token);
            let state = self.state;
            let registry = self.registry;
            let stream_key = key.clone();
            let opened = PresenceStream::open(&url, move |event| {
                let mut open = true;
                state.try_update(|s| open = s.apply(&stream_key, event));
                if open {
                    return;
                }
                leptos::logging::warn!("presence stream for {} closed by server", stream_key.path());
                // The stream cannot be dropped from inside its own listener.
                let key = stream_key.clone();
                leptos::task::spawn_local(async move {
                    let _ = registry.try_update_value(|r| r.replace(&key, None));
                });
            });
            match opened {
                Ok(stream) => Some(stream),
                Err(e) => {
                    leptos::logging::warn!("presence subscribe {} failed: {e}", key.path());
                    None
                }
            }
        }

        /// Share or open the stream for `key`. Without a usable token the key
        /// is held unopened until [`Self::reopen_all`] supplies one.
        pub fn acquire(&self, key: &PresenceKey, database_root: &str, id_token: Option<&str>) {
            let hub = *self;
            self.registry.update_value(|registry| {
                let open = || Ok::<_, Infallible>(hub.open_stream(key, database_root, id_token));
                let Ok(()) = registry.acquire(key, open);
            });
        }

        /// Reopen every held key with a new bearer token.
        pub fn reopen_all(&self, database_root: &str, id_token: &str) {
            let hub = *self;
            let mut reopened = 0;
            self.registry.update_value(|registry| {
                if registry.is_empty() {
                    return;
                }
                registry.replace_all(|key| hub.open_stream(key, database_root, Some(id_token)));
                reopened = registry.len();
            });
            if reopened > 0 {
                leptos::logging::log!("reopened {reopened} presence streams with a refreshed token");
            }
        }

        /// Release `key`; the stream closes when the last holder leaves.
        pub fn release(&self, key: &PresenceKey) {
            let mut closed = None;
            self.registry.update_value(|registry| closed = registry.release(key));
            if closed.is_some() {
                self.state.try_update(|s| s.forget(key));
            }
            drop(closed);
        }

        /// Close every stream, used on sign-out.
        pub fn close_all(&self) {
            let mut handles = Vec::new();
            self.registry.update_value(|registry| handles = registry.clear());
            drop(handles);
            self.state.try_update(PresenceState::clear);
        }
    }
}
