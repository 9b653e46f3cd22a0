//! Toast stack rendered in the page corner.

use leptos::prelude::*;

use crate::state::toast::ToastState;

#[component]
pub fn Toaster(toasts: RwSignal<ToastState>) -> impl IntoView {
    view! {
        <div class="toaster" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = format!("toast {}", toast.content.kind.css_modifier());
                        let title = toast.content.title;
                        let description = toast.content.description;
                        let has_description = !description.is_empty();
                        view! {
                            <div class=class role="status">
                                <div class="toast__body">
                                    <strong class="toast__title">{title}</strong>
                                    <Show when=move || has_description>
                                        <p class="toast__description">{description.clone()}</p>
                                    </Show>
                                </div>
                                <button
                                    class="toast__close"
                                    aria-label="Dismiss"
                                    on:click=move |_| toasts.update(|t| t.dismiss(&id))
                                >
                                    "x"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
