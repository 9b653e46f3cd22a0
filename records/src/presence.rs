//! Presence values mirrored from the hosted key/value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store streams a subtree as an initial `put` followed by incremental
//! `put`/`patch` events addressed by a slash-separated path relative to the
//! subscribed location. [`PresenceTree`] applies those events to a local JSON
//! mirror so readers can ask for the current `state` of a user, or count the
//! online users under the roster root.

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use serde_json::{Map, Value};

/// Root of the presence namespace.
pub const PRESENCE_ROOT: &str = "status";

/// Rendered presence of one record's user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Offline,
    /// No value has been observed at the path.
    #[default]
    Unknown,
}

impl PresenceStatus {
    /// Map a stored `state` string. `None` means nothing is stored.
    #[must_use]
    pub fn from_state(state: Option<&str>) -> Self {
        match state {
            Some("online") => Self::Online,
            Some(_) => Self::Offline,
            None => Self::Unknown,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Unknown => "Unknown",
        }
    }
}

/// A presence subscription target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PresenceKey {
    /// `status/<id>` for one record.
    Record(String),
    /// The whole `status` subtree.
    Roster,
}

impl PresenceKey {
    /// Store path, without leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Record(id) => format!("{PRESENCE_ROOT}/{id}"),
            Self::Roster => PRESENCE_ROOT.to_owned(),
        }
    }
}

/// Local mirror of a streamed subtree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresenceTree {
    root: Value,
}

impl PresenceTree {
    #[must_use]
    pub fn new() -> Self {
        Self { root: Value::Null }
    }

    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Replace the value at `path`. A `null` value deletes it.
    pub fn put(&mut self, path: &str, data: Value) {
        let segments = split_path(path);
        if segments.is_empty() {
            self.root = data;
            return;
        }
        if data.is_null() {
            remove_at(&mut self.root, &segments);
        } else {
            *slot_at(&mut self.root, &segments) = data;
        }
    }

    /// Merge the children of `data` into the value at `path`.
    pub fn patch(&mut self, path: &str, data: Map<String, Value>) {
        let base = split_path(path);
        for (key, value) in data {
            let mut child: Vec<&str> = base.clone();
            child.extend(split_path(&key));
            let joined = child.join("/");
            self.put(&joined, value);
        }
    }

    /// `state` string of a single-user subtree.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.root.get("state").and_then(Value::as_str)
    }

    /// Presence of a single-user subtree.
    #[must_use]
    pub fn status(&self) -> PresenceStatus {
        PresenceStatus::from_state(self.state())
    }

    /// Online children of a roster subtree.
    #[must_use]
    pub fn online_count(&self) -> usize {
        self.root.as_object().map_or(0, |children| {
            children
                .values()
                .filter(|child| child.get("state").and_then(Value::as_str) == Some("online"))
                .count()
        })
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn slot_at<'a>(root: &'a mut Value, segments: &[&str]) -> &'a mut Value {
    let mut current = root;
    for segment in segments {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map.entry((*segment).to_owned()).or_insert(Value::Null),
            other => other,
        };
    }
    current
}

fn remove_at(root: &mut Value, segments: &[&str]) {
    let Some((last, parents)) = segments.split_last() else {
        *root = Value::Null;
        return;
    };
    let mut current = root;
    for segment in parents {
        match current.get_mut(*segment) {
            Some(next) => current = next,
            None => return,
        }
    }
    if let Some(map) = current.as_object_mut() {
        map.remove(*last);
    }
}
