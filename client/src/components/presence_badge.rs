//! Per-row presence indicator.
//!
//! The badge holds a reference on its record's presence stream while it is
//! mounted. The registry shares that stream with the page's own reference.

use leptos::prelude::*;
use records::presence::PresenceStatus;

use crate::state::presence::PresenceState;

fn badge_class(status: PresenceStatus) -> &'static str {
    match status {
        PresenceStatus::Online => "presence-badge presence-badge--online",
        PresenceStatus::Offline => "presence-badge presence-badge--offline",
        PresenceStatus::Unknown => "presence-badge presence-badge--unknown",
    }
}

#[component]
pub fn PresenceBadge(id: String, presence: RwSignal<PresenceState>) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use records::presence::PresenceKey;

        use crate::state::auth::AuthState;
        use crate::state::config::ConfigState;
        use crate::state::presence::PresenceHub;

        let hub = expect_context::<PresenceHub>();
        let config = expect_context::<RwSignal<ConfigState>>();
        let auth = expect_context::<RwSignal<AuthState>>();
        let key = PresenceKey::Record(id.clone());
        let root = config.get_untracked().config.map(|c| c.database_root().to_owned());
        let token = auth.with_untracked(|a| a.usable_token(crate::util::time::now_ms()));
        if let Some(root) = root {
            hub.acquire(&key, &root, token.as_deref());
            on_cleanup(move || hub.release(&key));
        }
    }
    let status = Memo::new(move |_| presence.get().status(&id));

    view! {
        <span class=move || badge_class(status.get())>
            <span class="presence-badge__dot" aria-hidden="true"></span>
            {move || status.get().label()}
        </span>
    }
}
