//! Custom middlewares

use axum::{
	body::Body,
	extract::State,
	http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response},
	middleware::Next,
};
use tracing::Instrument;

use crate::extract::{Auth, RequestId};
use crate::prelude::*;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LENGTH: usize = 64;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
	let token = auth_header.strip_prefix("Bearer ")?.trim();
	(!token.is_empty()).then_some(token)
}

/// Resolves the caller's identity or answers 401 without running the handler
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	let Some(token) = bearer_token(req.headers()) else {
		debug!("Missing bearer token");
		return Err(Error::Unauthorized);
	};

	let ctx = app.auth_adapter.validate_token(token).await.map_err(|err| match err {
		Error::Unauthorized | Error::PermissionDenied => Error::Unauthorized,
		err => err,
	})?;

	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

/// Tags every request with an id, echoes it in the response, and runs the
/// request inside a span carrying it
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response<Body> {
	let req_id = req
		.headers()
		.get(&REQUEST_ID_HEADER)
		.and_then(|h| h.to_str().ok())
		.filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LENGTH)
		.map(ToString::to_string)
		.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

	let span = info_span!("request", req_id = %req_id, method = %req.method(), path = %req.uri().path());
	req.extensions_mut().insert(RequestId(req_id.clone()));

	let mut res = next.run(req).instrument(span).await;
	if let Ok(value) = HeaderValue::from_str(&req_id) {
		res.headers_mut().insert(REQUEST_ID_HEADER, value);
	}
	res
}


// vim: ts=4
