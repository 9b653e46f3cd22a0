//! Shared record model and pure triage logic.
//!
//! This crate owns everything the dashboard derives from hosted data without
//! touching the network: document decoding, filtering, pagination, presence
//! mirroring, arrival tracking and the versioned configuration schema. Both
//! `server` (configuration) and `client` (view model) depend on it.

pub mod chime;
pub mod config;
pub mod filter;
pub mod paging;
pub mod presence;
pub mod record;
pub mod stats;

pub use config::{ConfigError, DashboardConfig};
pub use record::{CardInfo, Notification, PersonalInfo, Status};
