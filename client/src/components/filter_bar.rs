//! Tabs plus the collapsible toggle panel.

use leptos::prelude::*;
use records::filter::Tab;

use crate::state::notifications::NotificationsState;
use crate::state::ui::UiState;

#[component]
pub fn FilterBar(records: RwSignal<NotificationsState>, ui: RwSignal<UiState>) -> impl IntoView {
    let active_toggles = move || records.get().filter.active_toggles();

    view! {
        <div class="filter-bar">
            <div class="filter-bar__tabs" role="tablist">
                {Tab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class="filter-bar__tab"
                                class:filter-bar__tab--active=move || records.get().filter.tab == tab
                                role="tab"
                                on:click=move |_| records.update(|s| s.set_tab(tab))
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            <button class="btn filter-bar__toggle" on:click=move |_| ui.update(UiState::toggle_filters)>
                "Filters"
                <Show when=move || { active_toggles() > 0 }>
                    <span class="filter-bar__badge">{active_toggles}</span>
                </Show>
            </button>
            <Show when=move || ui.get().show_filters>
                <div class="filter-bar__panel">
                    <label class="filter-bar__option">
                        <input
                            type="checkbox"
                            prop:checked=move || records.get().filter.online_only
                            on:change=move |ev| records.update(|s| s.set_online_only(event_target_checked(&ev)))
                        />
                        "Online only"
                    </label>
                    <label class="filter-bar__option">
                        <input
                            type="checkbox"
                            prop:checked=move || records.get().filter.card_only
                            on:change=move |ev| records.update(|s| s.set_card_only(event_target_checked(&ev)))
                        />
                        "With card only"
                    </label>
                </div>
            </Show>
        </div>
    }
}
