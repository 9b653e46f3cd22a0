//! Record table with per-row actions.

#[cfg(test)]
#[path = "notification_table_test.rs"]
mod notification_table_test;

use leptos::prelude::*;
use records::{Notification, Status};

use super::presence_badge::PresenceBadge;
use crate::state::notifications::PageView;
use crate::state::presence::PresenceState;
use crate::state::ui::{DialogKind, UiState};
use crate::util::record_actions::RecordActions;
use crate::util::time::relative_time;

pub(crate) fn status_class(status: Status) -> &'static str {
    match status {
        Status::Pending => "status-badge status-badge--pending",
        Status::Approved => "status-badge status-badge--approved",
        Status::Rejected => "status-badge status-badge--rejected",
    }
}

/// Name shown in the identity column: full name, else identity number.
pub(crate) fn display_name(record: &Notification) -> String {
    record
        .personal
        .as_ref()
        .and_then(|p| p.full_name.clone().or_else(|| p.identity.clone()))
        .unwrap_or_else(|| "-".to_owned())
}

#[component]
pub fn NotificationTable(
    page: Memo<PageView>,
    presence: RwSignal<PresenceState>,
    ui: RwSignal<UiState>,
    actions: RecordActions,
    now: RwSignal<i64>,
) -> impl IntoView {
    view! {
        <table class="record-table">
            <thead>
                <tr>
                    <th>"Received"</th>
                    <th>"Country"</th>
                    <th>"Name"</th>
                    <th>"Card"</th>
                    <th>"Status"</th>
                    <th>"Presence"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                <For each=move || page.get().rows key=|r| (r.id.clone(), r.status, r.card.is_some()) let:record>
                    <RecordRow record=record presence=presence ui=ui actions=actions now=now/>
                </For>
            </tbody>
        </table>
    }
}

#[component]
fn RecordRow(
    record: Notification,
    presence: RwSignal<PresenceState>,
    ui: RwSignal<UiState>,
    actions: RecordActions,
    now: RwSignal<i64>,
) -> impl IntoView {
    let created_ms = record.created_ms;
    let received = move || relative_time(created_ms, now.get());
    let country = record.country.clone().unwrap_or_else(|| "-".to_owned());
    let name = display_name(&record);
    let card = record.card.as_ref().map(|c| (c.masked_number(), c.prefix.clone()));
    let has_card = record.has_card_number();
    let status = record.status;
    let is_approved = status == Status::Approved;
    let is_rejected = status == Status::Rejected;
    let no_card = !has_card;

    let personal_record = record.clone();
    let card_record = record.clone();
    let approve_id = record.id.clone();
    let reject_id = record.id.clone();
    let hide_id = record.id.clone();

    view! {
        <tr class="record-table__row">
            <td class="record-table__time">{received}</td>
            <td>{country}</td>
            <td>{name}</td>
            <td class="record-table__card">
                {match card {
                    Some((masked, prefix)) if has_card => {
                        view! {
                            <span class="record-table__card-number">{masked}</span>
                            {prefix.map(|p| view! { <span class="record-table__card-prefix">{p}</span> })}
                        }
                            .into_any()
                    }
                    _ => view! { <span class="record-table__empty">"-"</span> }.into_any(),
                }}
            </td>
            <td>
                <span class=status_class(status)>{status.as_str()}</span>
            </td>
            <td>
                <PresenceBadge id=record.id.clone() presence=presence/>
            </td>
            <td class="record-table__actions">
                <button
                    class="btn btn--small"
                    on:click=move |_| ui.update(|u| u.open_dialog(DialogKind::Personal, &personal_record))
                >
                    "Info"
                </button>
                <button
                    class="btn btn--small"
                    disabled=no_card
                    on:click=move |_| ui.update(|u| u.open_dialog(DialogKind::Card, &card_record))
                >
                    "Card"
                </button>
                <button
                    class="btn btn--small btn--success"
                    disabled=is_approved
                    on:click=move |_| actions.set_status(approve_id.clone(), Status::Approved)
                >
                    "Approve"
                </button>
                <button
                    class="btn btn--small btn--warning"
                    disabled=is_rejected
                    on:click=move |_| actions.set_status(reject_id.clone(), Status::Rejected)
                >
                    "Reject"
                </button>
                <button class="btn btn--small btn--danger" on:click=move |_| actions.hide(hide_id.clone())>
                    "Hide"
                </button>
            </td>
        </tr>
    }
}
