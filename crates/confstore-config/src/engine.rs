//! Patch engine: applies configuration changes to a store, key by key

use confstore_core::prelude::*;
use confstore_types::config_adapter::{ConfigAdapter, KeyOutcome, KeyRejection};
use confstore_types::types::{ConfigMap, ConfigPatch, FailureList};

/// Applies a patch for one user.
///
/// All edits are attempted first, then all unsets, each group in the patch's
/// iteration order. A rejected key is appended to the returned list and the
/// remaining keys are still attempted. A store failure aborts the call; keys
/// attempted before it keep their new state.
pub async fn apply_patch(
	store: &dyn ConfigAdapter,
	user: UserId,
	patch: &ConfigPatch,
) -> ClResult<FailureList> {
	let overlapping: Vec<&str> = patch.overlapping_keys().collect();
	if !overlapping.is_empty() {
		warn!("Patch for user {} both edits and unsets {:?}", user, overlapping);
	}

	let mut failures = FailureList::new();

	for (key, value) in &patch.edit {
		if let KeyOutcome::Rejected(reason) = store.set_key(user, key, value).await? {
			debug!("Edit of '{}' rejected for user {}: {}", key, user, reason);
			failures.push(key.clone());
		}
	}

	for key in &patch.unset {
		if let KeyOutcome::Rejected(reason) = store.unset_key(user, key).await? {
			debug!("Unset of '{}' rejected for user {}: {}", key, user, reason);
			failures.push(key.clone());
		}
	}

	info!(
		"Patched config of user {}: {} applied, {} failed",
		user,
		patch.len() - failures.len(),
		failures.len()
	);

	Ok(failures)
}

fn rejection_error(key: &str, reason: KeyRejection) -> Error {
	match reason {
		KeyRejection::NotFound => Error::NotFound,
		reason => Error::ValidationError(format!("{}: {}", key, reason)),
	}
}

/// Reads a user's full configuration
pub async fn read_config(store: &dyn ConfigAdapter, user: UserId) -> ClResult<ConfigMap> {
	store.read_config(user).await
}

/// Sets a single key. A rejection is a client error, a store failure is not.
pub async fn set_key(
	store: &dyn ConfigAdapter,
	user: UserId,
	key: &str,
	value: &str,
) -> ClResult<()> {
	match store.set_key(user, key, value).await? {
		KeyOutcome::Applied => {
			info!("User {} set config key '{}'", user, key);
			Ok(())
		}
		KeyOutcome::Rejected(reason) => Err(rejection_error(key, reason)),
	}
}

/// Removes a single key. A rejection is a client error, a store failure is not.
pub async fn unset_key(store: &dyn ConfigAdapter, user: UserId, key: &str) -> ClResult<()> {
	match store.unset_key(user, key).await? {
		KeyOutcome::Applied => {
			info!("User {} unset config key '{}'", user, key);
			Ok(())
		}
		KeyOutcome::Rejected(reason) => Err(rejection_error(key, reason)),
	}
}


// vim: ts=4
