//! Per-user configuration subsystem
//!
//! # Architecture
//!
//! - **Engine** (`engine.rs`): applies patches and single-key changes to a store
//! - **View** (`view.rs`): converts between the store map and the wire shapes
//! - **Handler** (`handler.rs`): HTTP API endpoints for both API generations
//!
//! The legacy API reads an ordered entry list and patches with entries whose
//! missing value means "remove". The v2 API reads a flat map and patches with
//! explicit `edit`/`unset` collections. Both go through the same engine.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod handler;
pub mod view;

pub use engine::apply_patch;
pub use view::{normalize_legacy_patch, to_flat_map, to_ordered_entries};

// vim: ts=4
