//! # client
//!
//! Leptos + WASM frontend for the notifications triage dashboard.
//!
//! This crate contains pages, components, application state and the network
//! adapters for the hosted document store, the presence stream and the
//! identity service. Record decoding, filtering and paging live in the
//! `records` crate so the server can share the configuration types.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Hydration entry point for the WASM client.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
