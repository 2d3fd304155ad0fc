//! Configuration handlers

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};

use confstore_core::{extract::Auth, prelude::*};
use confstore_types::types::{ConfigPatch, Configuration, FailureList, FlatConfiguration};

use crate::{engine, view};

/// Key addressed by `PUT`/`DELETE /config/v2`, where the static v2 route
/// shadows the wildcard
const V2_KEY: &str = "v2";

/// 204 when every key was applied, otherwise 400 with the failed keys
fn patch_response(failures: FailureList) -> Response {
	if failures.is_empty() {
		StatusCode::NO_CONTENT.into_response()
	} else {
		(StatusCode::BAD_REQUEST, Json(failures)).into_response()
	}
}

/// GET /config - Full configuration as an ordered entry list
pub async fn get_config(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<(StatusCode, Json<Configuration>)> {
	let config = engine::read_config(app.config_adapter.as_ref(), auth.user).await?;

	Ok((StatusCode::OK, Json(view::to_ordered_entries(&config))))
}

/// GET /config/v2 - Full configuration as a flat map
pub async fn get_config_v2(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<(StatusCode, Json<FlatConfiguration>)> {
	let config = engine::read_config(app.config_adapter.as_ref(), auth.user).await?;

	Ok((StatusCode::OK, Json(view::to_flat_map(config))))
}

/// PATCH /config - Apply a legacy entry list; entries without a value are removed
pub async fn patch_config(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(changes): Json<Configuration>,
) -> ClResult<Response> {
	let patch = view::normalize_legacy_patch(changes);
	let failures = engine::apply_patch(app.config_adapter.as_ref(), auth.user, &patch).await?;

	Ok(patch_response(failures))
}

/// PATCH /config/v2 - Apply an edit/unset patch
pub async fn patch_config_v2(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(patch): Json<ConfigPatch>,
) -> ClResult<Response> {
	let failures = engine::apply_patch(app.config_adapter.as_ref(), auth.user, &patch).await?;

	Ok(patch_response(failures))
}

/// PUT /config/{*key} - Set one key to the raw request body.
/// A missing body sets the empty string; it never removes the key.
pub async fn put_config_key(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(key): Path<String>,
	value: String,
) -> ClResult<StatusCode> {
	engine::set_key(app.config_adapter.as_ref(), auth.user, &key, &value).await?;

	Ok(StatusCode::OK)
}

/// DELETE /config/{*key} - Remove one key
pub async fn delete_config_key(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(key): Path<String>,
) -> ClResult<StatusCode> {
	engine::unset_key(app.config_adapter.as_ref(), auth.user, &key).await?;

	Ok(StatusCode::OK)
}

/// PUT /config/v2 - Set the key "v2"
pub async fn put_config_v2_key(
	State(app): State<App>,
	Auth(auth): Auth,
	value: String,
) -> ClResult<StatusCode> {
	engine::set_key(app.config_adapter.as_ref(), auth.user, V2_KEY, &value).await?;

	Ok(StatusCode::OK)
}

/// DELETE /config/v2 - Remove the key "v2"
pub async fn delete_config_v2_key(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<StatusCode> {
	engine::unset_key(app.config_adapter.as_ref(), auth.user, V2_KEY).await?;

	Ok(StatusCode::OK)
}

// vim: ts=4
