//! Shared types, adapter traits, and core utilities for confstore.
//!
//! This crate contains the foundational types that are shared between the
//! feature crates and all adapter implementations, so adapters never depend
//! on the web layer.

#![forbid(unsafe_code)]

pub mod auth_adapter;
pub mod config_adapter;
pub mod error;
pub mod prelude;
pub mod types;

// vim: ts=4
