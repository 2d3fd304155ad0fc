//! Conversions between the store's native map and the wire shapes

use confstore_types::types::{
	ConfigEntry, ConfigMap, ConfigPatch, Configuration, EntryChange, FlatConfiguration,
};

/// One entry per stored key, in store iteration order
pub fn to_ordered_entries(config: &ConfigMap) -> Configuration {
	Configuration::new(
		config.iter().map(|(key, value)| ConfigEntry::new(key.clone(), value.clone())).collect(),
	)
}

/// The store map already is the flat wire shape
pub fn to_flat_map(config: ConfigMap) -> FlatConfiguration {
	config
}

/// Turns a legacy entry list into a normalized patch.
///
/// Later entries for the same key replace earlier ones, so `edit` and `unset`
/// of the result never share a key.
pub fn normalize_legacy_patch(changes: Configuration) -> ConfigPatch {
	let mut patch = ConfigPatch::new();

	for entry in changes.config {
		match entry.change() {
			EntryChange::Edit(value) => {
				patch.unset.remove(&entry.key);
				patch.edit.insert(entry.key, value);
			}
			EntryChange::Unset => {
				patch.edit.remove(&entry.key);
				patch.unset.insert(entry.key);
			}
		}
	}

	patch
}


// vim: ts=4
