//! JWT identity adapter.
//!
//! Verifies HS256 bearer tokens issued elsewhere with a shared secret. The
//! `sub` claim carries the numeric user id.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use confstore_types::{
	auth_adapter::{AuthAdapter, AuthCtx},
	prelude::*,
};

/// Claims expected in an access token
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessClaims {
	pub sub: String,
	pub exp: u64,
}

pub struct AuthAdapterJwt {
	key: DecodingKey,
	validation: Validation,
}

impl std::fmt::Debug for AuthAdapterJwt {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AuthAdapterJwt").field("validation", &self.validation).finish()
	}
}

impl AuthAdapterJwt {
	pub fn new(secret: &[u8]) -> ClResult<Self> {
		if secret.is_empty() {
			return Err(Error::ConfigError("JWT secret must not be empty".into()));
		}

		Ok(Self { key: DecodingKey::from_secret(secret), validation: Validation::new(Algorithm::HS256) })
	}
}

#[async_trait]
impl AuthAdapter for AuthAdapterJwt {
	async fn validate_token(&self, token: &str) -> ClResult<AuthCtx> {
		let token_data = decode::<AccessClaims>(token, &self.key, &self.validation).map_err(|err| {
			debug!("Token rejected: {}", err);
			Error::Unauthorized
		})?;

		let user = token_data.claims.sub.parse::<u32>().map_err(|_| {
			debug!("Token subject is not a user id: {}", token_data.claims.sub);
			Error::Unauthorized
		})?;

		Ok(AuthCtx { user: UserId(user) })
	}
}


// vim: ts=4
