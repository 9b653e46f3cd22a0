//! Notifications page: the authenticated dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. Once configuration and a session are available
//! it starts the record poll, keeps presence streams open for every loaded
//! record plus the roster, chimes on arrivals and hosts the operator actions.
//! Everything it starts is stopped when the page unmounts.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use records::paging::PageSize;

use crate::components::filter_bar::FilterBar;
use crate::components::info_dialog::InfoDialog;
use crate::components::notification_table::NotificationTable;
use crate::components::pagination_bar::PaginationBar;
use crate::components::stats_cards::StatsCards;
use crate::state::auth::AuthState;
use crate::state::config::ConfigState;
use crate::state::notifications::{NotificationsState, PageView};
use crate::state::presence::PresenceState;
use crate::state::toast::{self, Operation, ToastState};
use crate::state::ui::UiState;
use crate::util::auth::install_unauth_redirect;
use crate::util::record_actions::RecordActions;
use crate::util::ui_persistence::{self, PAGE_SIZE_KEY};

/// Header text for the record count.
fn records_heading(total: usize, filtered: usize, narrowing: bool) -> String {
    if narrowing && filtered != total {
        format!("{filtered} of {total} records")
    } else if total == 1 {
        "1 record".to_owned()
    } else {
        format!("{total} records")
    }
}

/// Page size restored from storage, falling back to the default.
fn restored_page_size(stored: Option<usize>) -> PageSize {
    stored.and_then(PageSize::from_count).unwrap_or_default()
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<RwSignal<ConfigState>>();
    let presence = expect_context::<RwSignal<PresenceState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    install_unauth_redirect(auth, navigate);

    let records = RwSignal::new(NotificationsState::with_page_size(restored_page_size(
        ui_persistence::load_json::<usize>(PAGE_SIZE_KEY),
    )));
    let actions = RecordActions { config, auth, records, toasts };
    let now = RwSignal::new(crate::util::time::now_ms());

    #[cfg(feature = "hydrate")]
    let wiring = live::start(live::LiveCtx { config, auth, records, presence, toasts, now });

    let page = Memo::new(move |_| {
        let presence = presence.get();
        records.with(|s| s.page_view(|id| presence.status(id)))
    });
    let page_size = Signal::derive(move || records.get().pagination.size());
    let on_page = Callback::new(move |p: usize| {
        let total = page.get_untracked().filtered_total;
        records.update(|s| s.go_to_page(p, total));
    });
    let on_size = Callback::new(move |size: PageSize| {
        if let Err(e) = ui_persistence::save_json(PAGE_SIZE_KEY, &size.get()) {
            leptos::logging::warn!("page size not saved: {e}");
        }
        records.update(|s| s.set_page_size(size));
    });

    let heading = move || {
        let state = records.get();
        records_heading(state.stats.total, page.get().filtered_total, state.filter.is_narrowing())
    };

    let on_refresh = move |_| {
        #[cfg(feature = "hydrate")]
        live::refresh(wiring);
    };

    let on_hide_all = move |_| actions.hide_all();

    // Clearing the session lets the unauthenticated redirect take over.
    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        live::shut_down(wiring);
        match crate::util::auth::clear_session(auth) {
            Ok(()) => toast::show(toasts, toast::signed_out()),
            Err(e) => {
                leptos::logging::error!("sign-out: {e}");
                toast::show(toasts, toast::failure(Operation::SignOut, &e));
            }
        }
    };

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().session.is_some()
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__title">"Notifications"</span>
                    <span class="toolbar__variant">{move || config.get().variant().to_owned()}</span>
                    <span class="toolbar__spacer"></span>
                    <button
                        class="btn toolbar__refresh"
                        disabled=move || records.get().refreshing
                        on:click=on_refresh
                        title="Refresh now"
                    >
                        {move || if records.get().refreshing { "Refreshing..." } else { "Refresh" }}
                    </button>
                    <button
                        class="btn btn--danger toolbar__hide-all"
                        disabled=move || records.get().records.is_empty()
                        on:click=on_hide_all
                    >
                        "Hide all"
                    </button>
                    <span class="toolbar__self">{move || auth.get().email().unwrap_or_default().to_owned()}</span>
                    <button class="btn toolbar__logout" on:click=on_sign_out title="Sign out">
                        "Sign out"
                    </button>
                </header>

                <StatsCards records=records presence=presence/>

                <section class="dashboard-page__records">
                    <div class="dashboard-page__records-header">
                        <h2>{heading}</h2>
                        <FilterBar records=records ui=ui/>
                    </div>
                    <Show
                        when=move || !records.get().loading
                        fallback=move || view! { <p class="dashboard-page__loading">"Loading records..."</p> }
                    >
                        <Show
                            when=move || { page.get().filtered_total > 0 }
                            fallback=move || view! { <p class="dashboard-page__empty">"No records to show."</p> }
                        >
                            <NotificationTable page=page presence=presence ui=ui actions=actions now=now/>
                        </Show>
                        <PaginationBar page=page on_page=on_page on_size=on_size page_size=page_size/>
                    </Show>
                </section>

                <InfoDialog ui=ui records=records actions=actions/>
            </div>
        </Show>
    }
}

#[cfg(feature = "hydrate")]
mod live {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use leptos::prelude::*;
    use records::Notification;
    use records::chime::ArrivalTracker;
    use records::presence::PresenceKey;

    use crate::net::error::BackendError;
    use crate::state::auth::AuthState;
    use crate::state::config::ConfigState;
    use crate::state::notifications::NotificationsState;
    use crate::state::presence::{PresenceHub, PresenceState, diff_ids};
    use crate::state::toast::{self, Operation, ToastState};
    use crate::util::record_actions::resolve_target;
    use crate::util::sound::{self, SoundHandle};

    const CLOCK_TICK_MS: u32 = 30_000;

    #[derive(Clone, Copy)]
    pub(super) struct LiveCtx {
        pub config: RwSignal<ConfigState>,
        pub auth: RwSignal<AuthState>,
        pub records: RwSignal<NotificationsState>,
        pub presence: RwSignal<PresenceState>,
        pub toasts: RwSignal<ToastState>,
        pub now: RwSignal<i64>,
    }

    /// Page-scoped resources shared by the poll callbacks.
    #[derive(Clone, Copy)]
    pub(super) struct Wiring {
        ctx: LiveCtx,
        hub: PresenceHub,
        sound: SoundHandle,
        tracker: StoredValue<ArrivalTracker>,
        /// Record ids this page holds presence references for.
        held: StoredValue<Vec<String>>,
        poll: StoredValue<Option<Arc<AtomicBool>>>,
        alive: StoredValue<Arc<AtomicBool>>,
    }

    pub(super) fn start(ctx: LiveCtx) -> Wiring {
        let alive = Arc::new(AtomicBool::new(true));
        let wiring = Wiring {
            ctx,
            hub: expect_context::<PresenceHub>(),
            sound: expect_context::<SoundHandle>(),
            tracker: StoredValue::new(ArrivalTracker::new()),
            held: StoredValue::new(Vec::new()),
            poll: StoredValue::new(None),
            alive: StoredValue::new(alive.clone()),
        };

        let clock_alive = alive;
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(CLOCK_TICK_MS).await;
                if !clock_alive.load(Ordering::Relaxed) {
                    break;
                }
                ctx.now.set(crate::util::time::now_ms());
            }
        });

        // Start the poll once configuration and a session exist.
        let poll = wiring.poll;
        let roster_root = StoredValue::new(None::<String>);
        Effect::new(move || {
            let ready = ctx.config.with(|c| c.config.is_some()) && ctx.auth.with(|a| a.session.is_some());
            if !ready || poll.with_value(Option::is_some) || !wiring.alive.with_value(|a| a.load(Ordering::Relaxed)) {
                return;
            }
            if let Some(config) = ctx.config.with_untracked(|c| c.config.clone()) {
                wiring.sound.update_value(|s| {
                    s.set_asset(&config.sound.asset);
                    s.preload();
                });
                let root = config.database_root().to_owned();
                wiring.hub.acquire(&PresenceKey::Roster, &root, usable_token(ctx).as_deref());
                roster_root.set_value(Some(root));
            }
            let handle = crate::net::live::spawn_record_poll(
                ctx.config,
                ctx.auth,
                move |snapshot| apply(wiring, snapshot),
                move |err| failed(wiring, &err),
            );
            poll.set_value(Some(handle));
        });

        on_cleanup(move || {
            stop(wiring);
            if roster_root.get_value().is_some() {
                wiring.hub.release(&PresenceKey::Roster);
            }
            for id in wiring.held.get_value() {
                wiring.hub.release(&PresenceKey::Record(id));
            }
        });
        wiring
    }

    fn usable_token(ctx: LiveCtx) -> Option<String> {
        ctx.auth.with_untracked(|a| a.usable_token(crate::util::time::now_ms()))
    }

    /// Stop the clock and the poll loop.
    fn stop(wiring: Wiring) {
        let _ = wiring.alive.try_with_value(|a| a.store(false, Ordering::Relaxed));
        if let Some(Some(handle)) = wiring.poll.try_get_value() {
            handle.store(false, Ordering::Relaxed);
        }
    }

    /// Stop polling and close every presence stream before the session goes away.
    pub(super) fn shut_down(wiring: Wiring) {
        stop(wiring);
        wiring.hub.close_all();
        wiring.held.set_value(Vec::new());
        wiring.tracker.update_value(ArrivalTracker::reset);
    }

    /// One-shot query applied like a poll snapshot.
    pub(super) fn refresh(wiring: Wiring) {
        let ctx = wiring.ctx;
        let (config, token) = match resolve_target(&ctx.config.get_untracked(), &ctx.auth.get_untracked()) {
            Ok(target) => target,
            Err(e) => return failed(wiring, &e),
        };
        ctx.records.update(|s| s.refreshing = true);
        leptos::task::spawn_local(async move {
            match crate::net::firestore::send_query(&config, &token).await {
                Ok(docs) => apply(wiring, crate::net::firestore::to_records(&docs, &config.schema)),
                Err(e) => failed(wiring, &e),
            }
        });
    }

    fn apply(wiring: Wiring, snapshot: Vec<Notification>) {
        let ctx = wiring.ctx;
        if ctx.records.try_update(|s| s.apply_snapshot(snapshot)).is_none() {
            return;
        }
        let visible = ctx.records.with_untracked(|s| s.records.clone());
        let ids: Vec<String> = visible.iter().map(|r| r.id.clone()).collect();

        let diff = diff_ids(&wiring.held.get_value(), &ids);
        if !diff.added.is_empty() || !diff.removed.is_empty() {
            let root = ctx.config.with_untracked(|c| c.config.as_ref().map(|c| c.database_root().to_owned()));
            if let Some(root) = &root {
                let token = usable_token(ctx);
                for id in &diff.added {
                    wiring.hub.acquire(&PresenceKey::Record(id.clone()), root, token.as_deref());
                }
            }
            for id in &diff.removed {
                wiring.hub.release(&PresenceKey::Record(id.clone()));
            }
            let held = if root.is_some() {
                ids
            } else {
                wiring.held.get_value().into_iter().filter(|id| !diff.removed.contains(id)).collect()
            };
            wiring.held.set_value(held);
        }

        let policy = ctx.config.with_untracked(|c| c.config.as_ref().map(|c| c.sound.policy)).unwrap_or_default();
        let mut should_chime = false;
        wiring.tracker.update_value(|t| should_chime = t.observe(policy, &visible));
        if should_chime {
            sound::chime(wiring.sound);
        }
    }

    fn failed(wiring: Wiring, err: &BackendError) {
        leptos::logging::warn!("record query failed: {err}");
        let first = wiring.ctx.records.try_update(NotificationsState::subscription_failed);
        if first == Some(true) {
            toast::show(wiring.ctx.toasts, toast::failure(Operation::Subscribe, err));
        }
    }
}
