//! Router assembly

use axum::{
	extract::DefaultBodyLimit,
	middleware,
	routing::{get, put},
	Router,
};
use tower_http::trace::TraceLayer;

use crate::config::handler;
use crate::prelude::*;
use confstore_core::middleware::{request_id, require_auth};

pub fn init(app: App) -> Router {
	let protected_router = Router::new()
		.route("/config", get(handler::get_config).patch(handler::patch_config))
		.route(
			"/config/v2",
			get(handler::get_config_v2)
				.patch(handler::patch_config_v2)
				.put(handler::put_config_v2_key)
				.delete(handler::delete_config_v2_key),
		)
		// Keys may contain '/', so the rest of the path is the key
		.route("/config/{*key}", put(handler::put_config_key).delete(handler::delete_config_key))
		.route_layer(middleware::from_fn_with_state(app.clone(), require_auth));

	Router::new()
		.merge(protected_router)
		.layer(DefaultBodyLimit::max(app.opts.body_limit))
		.layer(TraceLayer::new_for_http())
		.layer(middleware::from_fn(request_id))
		.with_state(app)
}

// vim: ts=4
