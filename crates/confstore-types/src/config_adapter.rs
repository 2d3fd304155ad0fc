//! Configuration store capability.
//!
//! The store keeps one flat string-to-string mapping per user. Every
//! operation is scoped to a single user and is atomic for its single key;
//! there are no cross-key transactions.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::ConfigMap;

/// Maximum key length in bytes
pub const MAX_KEY_LENGTH: usize = 255;
/// Maximum value length in bytes
pub const MAX_VALUE_LENGTH: usize = 262_144;
/// Maximum nesting depth of a value that parses as JSON
pub const MAX_VALUE_DEPTH: usize = 8;
/// serde_json refuses to parse input nested deeper than this
const PARSER_DEPTH_LIMIT: usize = 128;

/// Why a store refused to apply a single key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRejection {
	InvalidKey,
	ValueTooLong,
	ValueTooDeep,
	/// Unset of a key that does not exist
	NotFound,
}

impl std::fmt::Display for KeyRejection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			KeyRejection::InvalidKey => write!(f, "invalid key"),
			KeyRejection::ValueTooLong => {
				write!(f, "value exceeds {} bytes", MAX_VALUE_LENGTH)
			}
			KeyRejection::ValueTooDeep => {
				write!(f, "value nesting exceeds depth {}", MAX_VALUE_DEPTH)
			}
			KeyRejection::NotFound => write!(f, "key does not exist"),
		}
	}
}

/// Result of a single-key store operation. Rejections are data; store
/// failures are reported through `Err`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
	Applied,
	Rejected(KeyRejection),
}

impl KeyOutcome {
	pub fn is_applied(&self) -> bool {
		matches!(self, KeyOutcome::Applied)
	}
}

#[async_trait]
pub trait ConfigAdapter: Debug + Send + Sync {
	/// Reads the full configuration of a user
	async fn read_config(&self, user: UserId) -> ClResult<ConfigMap>;

	/// Sets a key. Empty values are allowed.
	async fn set_key(&self, user: UserId, key: &str, value: &str) -> ClResult<KeyOutcome>;

	/// Removes a key. Reports `NotFound` if the key is not present.
	async fn unset_key(&self, user: UserId, key: &str) -> ClResult<KeyOutcome>;
}

// Validation //
//************//
/// Checks a key against the rules shared by all stores: non-empty, bounded
/// length, no whitespace or control characters, no `$`/`_` prefix, and no
/// empty dot-separated segment
pub fn validate_key(key: &str) -> Result<(), KeyRejection> {
	let valid = !key.is_empty()
		&& key.len() <= MAX_KEY_LENGTH
		&& !key.starts_with(['$', '_'])
		&& !key.chars().any(|c| c.is_whitespace() || c.is_control())
		&& key.split('.').all(|segment| !segment.is_empty());

	if valid { Ok(()) } else { Err(KeyRejection::InvalidKey) }
}

fn json_depth(value: &serde_json::Value) -> usize {
	match value {
		serde_json::Value::Array(items) => 1 + items.iter().map(json_depth).max().unwrap_or(0),
		serde_json::Value::Object(map) => 1 + map.values().map(json_depth).max().unwrap_or(0),
		_ => 1,
	}
}

/// Deepest `[`/`{` nesting outside of string literals
fn bracket_depth(value: &str) -> usize {
	let (mut depth, mut max_depth) = (0usize, 0usize);
	let (mut in_string, mut escaped) = (false, false);

	for byte in value.bytes() {
		if in_string {
			match byte {
				_ if escaped => escaped = false,
				b'\\' => escaped = true,
				b'"' => in_string = false,
				_ => {}
			}
			continue;
		}
		match byte {
			b'"' => in_string = true,
			b'[' | b'{' => {
				depth += 1;
				max_depth = max_depth.max(depth);
			}
			b']' | b'}' => depth = depth.saturating_sub(1),
			_ => {}
		}
	}

	max_depth
}

/// Checks a value for size and, if it is JSON, for nesting depth
pub fn validate_value(value: &str) -> Result<(), KeyRejection> {
	if value.len() > MAX_VALUE_LENGTH {
		return Err(KeyRejection::ValueTooLong);
	}

	// Too deep for the parser to tell JSON from text; never a valid value
	if bracket_depth(value) >= PARSER_DEPTH_LIMIT {
		return Err(KeyRejection::ValueTooDeep);
	}

	// Plain strings are stored as-is
	if let Ok(json) = serde_json::from_str::<serde_json::Value>(value) {
		if json_depth(&json) > MAX_VALUE_DEPTH {
			return Err(KeyRejection::ValueTooDeep);
		}
	}

	Ok(())
}

/// Validates a key/value pair for `set_key`
pub fn validate_entry(key: &str, value: &str) -> Result<(), KeyRejection> {
	validate_key(key)?;
	validate_value(value)
}


// vim: ts=4
