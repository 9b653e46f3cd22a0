//! Hosted presence store adapter (Realtime Database REST streaming).
//!
//! SYSTEM CONTEXT
//! ==============
//! Presence lives under `status/<id>` in a realtime key/value store. Its REST
//! surface streams a location as server-sent events: `put` and `patch` carry
//! `{"path": ..., "data": ...}`, `keep-alive` carries nothing, and `cancel` /
//! `auth_revoked` end the stream.
//!
//! DESIGN
//! ======
//! [`parse_event`] is pure. [`PresenceStream`] owns the browser `EventSource`
//! and its listener closures; dropping it closes the connection, which is how
//! the presence registry tears a stream down.

#[cfg(test)]
#[path = "rtdb_test.rs"]
mod rtdb_test;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::BackendError;

/// Event names the stream emits.
pub const EVENT_NAMES: [&str; 5] = ["put", "patch", "keep-alive", "cancel", "auth_revoked"];

/// One decoded server-sent event.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Map<String, Value> },
    KeepAlive,
    /// The server refused the location (rules changed or permission denied).
    Cancel(String),
    /// The token expired or was revoked; reopen with a fresh one.
    AuthRevoked,
}

#[derive(Deserialize)]
struct Envelope {
    path: String,
    #[serde(default)]
    data: Value,
}

/// Streaming URL for `path` under `database_root`.
#[must_use]
pub fn stream_url(database_root: &str, path: &str, id_token: &str) -> String {
    format!("{}/{}.json?auth={id_token}", database_root.trim_end_matches('/'), path.trim_matches('/'))
}

/// Decode the `data` payload of a named event.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] for unknown event names or malformed payloads.
pub fn parse_event(name: &str, data: &str) -> Result<StreamEvent, BackendError> {
    match name {
        "put" => {
            let env = envelope(name, data)?;
            Ok(StreamEvent::Put { path: env.path, data: env.data })
        }
        "patch" => {
            let env = envelope(name, data)?;
            match env.data {
                Value::Object(map) => Ok(StreamEvent::Patch { path: env.path, data: map }),
                other => Err(BackendError::Decode(format!("patch data must be an object, got {other}"))),
            }
        }
        "keep-alive" => Ok(StreamEvent::KeepAlive),
        "cancel" => Ok(StreamEvent::Cancel(serde_json::from_str::<String>(data).unwrap_or_else(|_| data.to_owned()))),
        "auth_revoked" => Ok(StreamEvent::AuthRevoked),
        other => Err(BackendError::Decode(format!("unknown stream event `{other}`"))),
    }
}

fn envelope(name: &str, data: &str) -> Result<Envelope, BackendError> {
    serde_json::from_str(data).map_err(|e| BackendError::Decode(format!("{name} event: {e}")))
}

/// Open browser stream for one presence location.
#[cfg(feature = "hydrate")]
pub struct PresenceStream {
    source: web_sys::EventSource,
    _listeners: Vec<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MessageEvent)>>,
}

#[cfg(feature = "hydrate")]
impl PresenceStream {
    /// Connect to `url` and forward decoded events to `on_event`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Transport`] if the browser refuses the URL.
    pub fn open<F>(url: &str, on_event: F) -> Result<Self, BackendError>
    where
        F: Fn(StreamEvent) + 'static,
    {
        use std::rc::Rc;
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let source = web_sys::EventSource::new(url)
            .map_err(|e| BackendError::Transport(format!("event source: {e:?}")))?;
        let on_event = Rc::new(on_event);
        let mut listeners = Vec::with_capacity(EVENT_NAMES.len());
        for name in EVENT_NAMES {
            let handler = Rc::clone(&on_event);
            let listener = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
                let data = ev.data().as_string().unwrap_or_default();
                match parse_event(name, &data) {
                    Ok(event) => handler(event),
                    Err(e) => leptos::logging::warn!("presence stream: {e}"),
                }
            });
            source
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                .map_err(|e| BackendError::Transport(format!("listener {name}: {e:?}")))?;
            listeners.push(listener);
        }
        Ok(Self { source, _listeners: listeners })
    }
}

#[cfg(feature = "hydrate")]
impl Drop for PresenceStream {
    fn drop(&mut self) {
        self.source.close();
    }
}

/// Server-side stand-in; presence is only streamed in the browser.
#[cfg(not(feature = "hydrate"))]
#[derive(Debug)]
pub struct PresenceStream;
