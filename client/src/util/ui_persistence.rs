//! Browser localStorage helpers for session and preference persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize hydrate-only read/write behavior so pages and
//! components can persist small values without repeating web-sys glue.

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// `localStorage` key of the selected page size.
pub const PAGE_SIZE_KEY: &str = "triage.page_size";

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
///
/// # Errors
///
/// Returns a description when the value cannot be encoded or storage is
/// unavailable or refuses the write (for example when its quota is full).
pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| format!("encode {key}: {e}"))?;
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_owned())?;
        storage.set_item(key, &raw).map_err(|e| format!("write {key}: {e:?}"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = raw;
        Ok(())
    }
}

/// Remove `key` from `localStorage`.
///
/// # Errors
///
/// Returns a description when storage is unavailable or refuses the removal.
pub fn remove_key(key: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_owned())?;
        storage.remove_item(key).map_err(|e| format!("{e:?}"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        Ok(())
    }
}
