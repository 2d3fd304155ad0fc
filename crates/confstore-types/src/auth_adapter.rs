//! Identity resolution capability.
//!
//! An `AuthAdapter` turns the credential presented with a request into the
//! identity that owns a configuration. The core never runs without one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// Resolved identity of the caller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCtx {
	pub user: UserId,
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Validates a bearer token. Returns `Error::Unauthorized` if it does not
	/// resolve to an identity.
	async fn validate_token(&self, token: &str) -> ClResult<AuthCtx>;
}

// vim: ts=4
