//! Header counters: visible records, records with card data, online users.

use leptos::prelude::*;

use crate::state::notifications::NotificationsState;
use crate::state::presence::PresenceState;

#[component]
pub fn StatsCards(records: RwSignal<NotificationsState>, presence: RwSignal<PresenceState>) -> impl IntoView {
    let total = move || records.get().stats.total;
    let with_card = move || records.get().stats.with_card;
    let online = move || presence.get().online_count();

    view! {
        <div class="stats-cards">
            <div class="stats-card">
                <span class="stats-card__label">"Records"</span>
                <span class="stats-card__value">{total}</span>
            </div>
            <div class="stats-card">
                <span class="stats-card__label">"With card"</span>
                <span class="stats-card__value">{with_card}</span>
            </div>
            <div class="stats-card">
                <span class="stats-card__label">"Online users"</span>
                <span class="stats-card__value">{online}</span>
            </div>
        </div>
    }
}
