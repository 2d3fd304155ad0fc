//! Common types used throughout confstore.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// UserId //
//********//
/// Opaque handle of the configuration's owner, produced by an `AuthAdapter`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Native representation of one user's configuration in a store.
///
/// Iteration order (ascending key) is the store iteration order.
pub type ConfigMap = BTreeMap<Box<str>, Box<str>>;

/// Flat wire representation of a full configuration snapshot
pub type FlatConfiguration = ConfigMap;

/// Keys of a patch that could not be applied, in attempt order
pub type FailureList = Vec<Box<str>>;

// ConfigEntry //
//*************//
/// Legacy wire entry. A missing or `null` value means "remove this key" when
/// submitted as a patch; entries produced by reads always carry a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
	pub key: Box<str>,
	#[serde(default)]
	pub value: Option<Box<str>>,
}

impl ConfigEntry {
	pub fn new(key: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
		Self { key: key.into(), value: Some(value.into()) }
	}

	/// Entry that removes `key` when submitted in a legacy patch
	pub fn removal(key: impl Into<Box<str>>) -> Self {
		Self { key: key.into(), value: None }
	}

	/// Decode the nullable legacy encoding into an explicit change
	pub fn change(&self) -> EntryChange {
		match &self.value {
			Some(value) => EntryChange::Edit(value.clone()),
			None => EntryChange::Unset,
		}
	}
}

/// What a single patch entry does to its key
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryChange {
	Edit(Box<str>),
	Unset,
}

// Configuration //
//***************//
/// Ordered-list wire representation of a configuration snapshot, also the
/// legacy patch body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
	#[serde(default)]
	pub config: Vec<ConfigEntry>,
}

impl Configuration {
	pub fn new(config: Vec<ConfigEntry>) -> Self {
		Self { config }
	}
}

// ConfigPatch //
//*************//
/// Normalized patch: keys to set and keys to remove.
///
/// Both collections iterate in ascending key order. A key may appear in both;
/// the engine then attempts the edit first and the unset after it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
	#[serde(default)]
	pub edit: BTreeMap<Box<str>, Box<str>>,
	#[serde(default)]
	pub unset: BTreeSet<Box<str>>,
}

impl ConfigPatch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_edit(mut self, key: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
		self.edit.insert(key.into(), value.into());
		self
	}

	pub fn with_unset(mut self, key: impl Into<Box<str>>) -> Self {
		self.unset.insert(key.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.edit.is_empty() && self.unset.is_empty()
	}

	/// Number of store operations the patch will attempt
	pub fn len(&self) -> usize {
		self.edit.len() + self.unset.len()
	}

	/// Keys present in both `edit` and `unset`
	pub fn overlapping_keys(&self) -> impl Iterator<Item = &str> {
		self.unset.iter().filter(|key| self.edit.contains_key(*key)).map(|key| &**key)
	}
}

// vim: ts=4
