//! Notification chime.
//!
//! DESIGN
//! ======
//! One audio element is created on first use and reused for every chime, so
//! rapid snapshots restart the same sound instead of stacking players. The
//! handle lives in a local stored value provided through context; the element
//! is not `Send` and never leaves the browser thread.
//!
//! ERROR HANDLING
//! ==============
//! Browsers reject `play()` until the user has interacted with the page.
//! Rejections are logged and otherwise ignored.

#[cfg(test)]
#[path = "sound_test.rs"]
mod sound_test;

use leptos::prelude::*;

pub const CHIME_VOLUME: f64 = 0.5;

/// Lazily constructed, reused audio handle.
pub struct NotificationSound {
    asset: String,
    #[cfg(feature = "hydrate")]
    element: Option<web_sys::HtmlAudioElement>,
}

impl NotificationSound {
    #[must_use]
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            #[cfg(feature = "hydrate")]
            element: None,
        }
    }

    #[must_use]
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Point at a different asset; the next chime rebuilds the element.
    pub fn set_asset(&mut self, asset: &str) {
        if self.asset != asset {
            self.asset = asset.to_owned();
            #[cfg(feature = "hydrate")]
            {
                self.element = None;
            }
        }
    }

    /// Create the audio element ahead of the first chime.
    pub fn preload(&mut self) {
        #[cfg(feature = "hydrate")]
        {
            if self.element.is_some() {
                return;
            }
            match web_sys::HtmlAudioElement::new_with_src(&self.asset) {
                Ok(el) => {
                    el.set_volume(CHIME_VOLUME);
                    el.set_preload("auto");
                    self.element = Some(el);
                }
                Err(e) => leptos::logging::warn!("audio element unavailable: {e:?}"),
            }
        }
    }

    /// Rewind and play the chime.
    pub fn play(&mut self) {
        #[cfg(feature = "hydrate")]
        {
            self.preload();
            let Some(el) = self.element.as_ref() else {
                return;
            };
            el.set_current_time(0.0);
            match el.play() {
                Ok(promise) => {
                    leptos::task::spawn_local(async move {
                        if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                            leptos::logging::log!("chime blocked: {e:?}");
                        }
                    });
                }
                Err(e) => leptos::logging::warn!("chime failed: {e:?}"),
            }
        }
    }
}

/// Context handle to the shared [`NotificationSound`].
pub type SoundHandle = StoredValue<NotificationSound, LocalStorage>;

#[must_use]
pub fn provide_notification_sound(asset: &str) -> SoundHandle {
    let handle = StoredValue::new_local(NotificationSound::new(asset));
    provide_context(handle);
    handle
}

/// Play the chime through `handle`; a disposed handle is ignored.
pub fn chime(handle: SoundHandle) {
    let _ = handle.try_update_value(NotificationSound::play);
}
