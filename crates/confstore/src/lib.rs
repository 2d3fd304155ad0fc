//! confstore is a per-user configuration service.
//!
//! # Features
//!
//! - Read a user's configuration as an ordered entry list or as a flat map
//! - Patch it with per-key failure reporting
//!		- legacy entry lists, where an entry without a value removes the key
//!		- v2 patches with explicit `edit` and `unset` collections
//! - Set or remove single keys
//! - Pluggable identity (`AuthAdapter`) and storage (`ConfigAdapter`)

#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from confstore-types
pub use confstore_types::auth_adapter;
pub use confstore_types::config_adapter;
pub use confstore_types::error;
pub use confstore_types::types;

// Feature crate re-exports
pub use confstore_config as config;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;
pub mod webserver;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
