//! In-memory configuration adapter.
//!
//! Keeps every user's configuration in a single map guarded by a
//! `parking_lot` lock. Each operation takes the lock once, so single-key
//! operations are atomic. Nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use confstore_types::{
	config_adapter::{self, ConfigAdapter, KeyOutcome, KeyRejection},
	prelude::*,
	types::ConfigMap,
};

#[derive(Debug, Default)]
pub struct ConfigAdapterMemory {
	users: RwLock<HashMap<UserId, ConfigMap>>,
}

impl ConfigAdapterMemory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces a user's configuration wholesale, bypassing validation
	pub fn seed(&self, user: UserId, config: ConfigMap) {
		self.users.write().insert(user, config);
	}
}

#[async_trait]
impl ConfigAdapter for ConfigAdapterMemory {
	async fn read_config(&self, user: UserId) -> ClResult<ConfigMap> {
		Ok(self.users.read().get(&user).cloned().unwrap_or_default())
	}

	async fn set_key(&self, user: UserId, key: &str, value: &str) -> ClResult<KeyOutcome> {
		if let Err(rejection) = config_adapter::validate_entry(key, value) {
			return Ok(KeyOutcome::Rejected(rejection));
		}

		self.users.write().entry(user).or_default().insert(key.into(), value.into());
		Ok(KeyOutcome::Applied)
	}

	async fn unset_key(&self, user: UserId, key: &str) -> ClResult<KeyOutcome> {
		if let Err(rejection) = config_adapter::validate_key(key) {
			return Ok(KeyOutcome::Rejected(rejection));
		}

		let mut users = self.users.write();
		let removed = users.get_mut(&user).and_then(|config| config.remove(key));
		Ok(match removed {
			Some(_) => KeyOutcome::Applied,
			None => KeyOutcome::Rejected(KeyRejection::NotFound),
		})
	}
}


// vim: ts=4
