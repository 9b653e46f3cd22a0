//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome and record views while reading/writing
//! shared state from Leptos context providers.

pub mod filter_bar;
pub mod info_dialog;
pub mod notification_table;
pub mod pagination_bar;
pub mod presence_badge;
pub mod stats_cards;
pub mod toaster;
