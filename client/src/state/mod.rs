//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `notifications`, `presence`, etc.) so
//! individual components can depend on small focused models.

pub mod auth;
pub mod config;
pub mod notifications;
pub mod presence;
pub mod toast;
pub mod ui;
