//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use records::config::DEFAULT_SOUND_ASSET;

use crate::components::toaster::Toaster;
use crate::pages::{login::LoginPage, notifications::NotificationsPage};
use crate::state::{
    auth::AuthState, config::ConfigState, presence::PresenceState, toast::ToastState, ui::UiState,
};
use crate::util::sound::provide_notification_sound;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts, loads the dashboard configuration and
/// restores any stored session before routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let config = RwSignal::new(ConfigState::default());
    let presence = RwSignal::new(PresenceState::default());
    let ui = RwSignal::new(UiState::default());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(auth);
    provide_context(config);
    provide_context(presence);
    provide_context(ui);
    provide_context(toasts);
    let _ = provide_notification_sound(DEFAULT_SOUND_ASSET);

    #[cfg(feature = "hydrate")]
    {
        use crate::state::presence::{PresenceHub, token_rotated};

        let hub = PresenceHub::new(presence);
        provide_context(hub);
        crate::util::auth::restore_session(auth);

        // Stream URLs carry the bearer token, so held streams are reopened
        // whenever the refresher or a new sign-in replaces it.
        let seen_token = StoredValue::new(None::<String>);
        Effect::new(move || {
            let token = auth.with(AuthState::id_token);
            let root = config.with(|c| c.config.as_ref().map(|c| c.database_root().to_owned()));
            if !token_rotated(seen_token.get_value().as_deref(), token.as_deref()) {
                return;
            }
            seen_token.set_value(token);
            let usable = auth.with_untracked(|a| a.usable_token(crate::util::time::now_ms()));
            if let (Some(root), Some(token)) = (root, usable) {
                hub.reopen_all(&root, &token);
            }
        });

        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_config().await {
                Ok(loaded) => {
                    config.update(|c| c.loaded(loaded));
                    // The refresher needs the API key, so it starts once config is in.
                    crate::util::auth::spawn_token_refresher(auth, config);
                }
                Err(e) => {
                    leptos::logging::error!("config load failed: {e}");
                    config.update(|c| c.failed(e.to_string()));
                }
            }
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/triage.css"/>
        <Title text="Triage"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=NotificationsPage/>
            </Routes>
        </Router>
        <Toaster toasts=toasts/>
    }
}
