//! Core infrastructure for confstore.
//!
//! Shared application state, request extractors, and the middleware that
//! resolves the caller's identity before any feature handler runs.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod middleware;
pub mod prelude;

// Re-export commonly used types
pub use app::{Adapters, App, AppBuilderOpts, AppState, VERSION};
pub use extract::{Auth, OptionalRequestId, RequestId};

// vim: ts=4
