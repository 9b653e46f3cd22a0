//! Login page: email + password against the hosted auth provider.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::config::ConfigState;
use crate::state::toast::ToastState;

fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<RwSignal<ConfigState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: go straight to the dashboard.
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.session.is_some() {
            navigate("/", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get(), &password.get()) {
            Ok(pair) => pair,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let Some(api_key) = config.get_untracked().config.map(|c| c.backend.api_key) else {
            info.set("Configuration is still loading. Try again in a moment.".to_owned());
            return;
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let now = crate::util::time::now_ms();
            match crate::net::identity::sign_in(&api_key, &email_value, &password_value, now).await {
                Ok(session) => {
                    crate::util::auth::store_session(auth, session);
                    password.set(String::new());
                    info.set(String::new());
                }
                Err(e) => {
                    use crate::state::toast::{self, Operation};

                    leptos::logging::warn!("sign-in failed: {e}");
                    info.set(String::new());
                    toast::show(toasts, toast::failure(Operation::SignIn, &e));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (api_key, email_value, password_value, toasts);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Triage"</h1>
                <p class="login-card__subtitle">
                    {move || {
                        let variant = config.get().variant().to_owned();
                        if variant.is_empty() { "Operator sign-in".to_owned() } else { format!("Operator sign-in ({variant})") }
                    }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <Show when=move || config.get().error.is_some()>
                    <p class="login-message login-message--error">
                        {move || config.get().error.unwrap_or_default()}
                    </p>
                </Show>
            </div>
        </div>
    }
}
