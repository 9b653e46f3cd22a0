//! Details dialog showing the personal or card subset of a record.
//!
//! The dialog renders a copy of the record taken when it was opened; only the
//! violation editor reads live state so a save is reflected immediately.

#[cfg(test)]
#[path = "info_dialog_test.rs"]
mod info_dialog_test;

use leptos::prelude::*;
use records::Notification;

use crate::state::notifications::NotificationsState;
use crate::state::ui::{DialogKind, UiState};
use crate::util::record_actions::RecordActions;

const MISSING: &str = "-";

fn or_missing(value: Option<&str>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING).to_owned()
}

/// Label/value rows shown for `kind`. Card numbers are always masked.
pub(crate) fn detail_rows(kind: DialogKind, record: &Notification) -> Vec<(&'static str, String)> {
    match kind {
        DialogKind::Personal => {
            let personal = record.personal.as_ref();
            vec![
                ("Identity", or_missing(personal.and_then(|p| p.identity.as_deref()))),
                ("Full name", or_missing(personal.and_then(|p| p.full_name.as_deref()))),
                ("Phone", or_missing(personal.and_then(|p| p.phone.as_deref()))),
                ("Email", or_missing(personal.and_then(|p| p.email.as_deref()))),
                ("Country", or_missing(record.country.as_deref())),
                ("Plate type", or_missing(personal.and_then(|p| p.plate_type.as_deref()))),
                ("Current page", or_missing(record.current_page.as_deref())),
            ]
        }
        DialogKind::Card => {
            let card = record.card.as_ref();
            vec![
                ("Bank", or_missing(card.and_then(|c| c.bank.as_deref()))),
                ("Card number", card.map_or_else(|| MISSING.to_owned(), |c| or_missing(Some(&c.masked_number())))),
                ("Holder", or_missing(card.and_then(|c| c.holder.as_deref()))),
                ("Expiry", or_missing(card.and_then(|c| c.expiry.as_deref()))),
                ("Network", or_missing(card.and_then(|c| c.network.as_deref()))),
            ]
        }
    }
}

#[component]
pub fn InfoDialog(ui: RwSignal<UiState>, records: RwSignal<NotificationsState>, actions: RecordActions) -> impl IntoView {
    let close = move || ui.update(UiState::close_dialog);
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    view! {
        <Show when=move || ui.get().dialog.is_some()>
            {move || {
                let Some(dialog) = ui.get().dialog else {
                    return ().into_any();
                };
                let id = dialog.record.id.clone();
                let prefix = dialog.record.card.as_ref().and_then(|c| c.prefix.clone());
                let rows = detail_rows(dialog.kind, &dialog.record)
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <div class="dialog__row">
                                <span class="dialog__label">{label}</span>
                                <span class="dialog__value">{value}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>();
                let is_personal = dialog.kind == DialogKind::Personal;
                let has_prefix = prefix.is_some();
                view! {
                    <div class="dialog-backdrop" on:click=move |_| close()>
                        <div
                            class="dialog dialog--details"
                            on:click=move |ev| ev.stop_propagation()
                            on:keydown=on_keydown
                            tabindex="0"
                        >
                            <h2>{dialog.kind.title()}</h2>
                            <Show when=move || has_prefix>
                                <span class="dialog__badge">{prefix.clone().unwrap_or_default()}</span>
                            </Show>
                            {rows}
                            <Show when=move || is_personal>
                                <ViolationEditor id=id.clone() records=records actions=actions/>
                            </Show>
                            <div class="dialog__actions">
                                <button class="btn" on:click=move |_| close()>"Close"</button>
                            </div>
                        </div>
                    </div>
                }
                    .into_any()
            }}
        </Show>
    }
}

#[component]
fn ViolationEditor(id: String, records: RwSignal<NotificationsState>, actions: RecordActions) -> impl IntoView {
    let draft_id = id.clone();
    let input_id = id.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        actions.save_violation(id.clone());
    };

    view! {
        <form class="dialog__row dialog__violation" on:submit=on_save>
            <label class="dialog__label" for="violation-value">"Violation value"</label>
            <input
                id="violation-value"
                class="dialog__input"
                type="text"
                inputmode="decimal"
                prop:value=move || records.get().violation_draft(&draft_id)
                on:input=move |ev| records.update(|s| s.set_violation_draft(&input_id, event_target_value(&ev)))
            />
            <button class="btn btn--primary" type="submit">"Save"</button>
        </form>
    }
}
