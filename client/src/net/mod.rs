//! Networking modules for the host server and the hosted services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the host server, `firestore`, `rtdb` and `identity` wrap the
//! hosted document, presence and auth endpoints, and `live` turns document
//! queries into a snapshot stream.

pub mod api;
pub mod error;
pub mod firestore;
pub mod identity;
pub mod live;
pub mod rtdb;
