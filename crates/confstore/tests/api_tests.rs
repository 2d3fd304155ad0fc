//! HTTP API tests
//!
//! Drives the full router in-process against the memory store and the JWT
//! identity adapter.

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{header, Method, Request, StatusCode},
	Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::{
	atomic::{AtomicUsize, Ordering},
	Arc,
};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

use confstore::config_adapter::{ConfigAdapter, KeyOutcome};
use confstore::error::{ClResult, Error};
use confstore::types::{ConfigMap, UserId};
use confstore::{routes, AppBuilder};
use confstore_auth_adapter_jwt::AuthAdapterJwt;
use confstore_config_adapter_memory::ConfigAdapterMemory;

const SECRET: &[u8] = b"api test secret";

#[derive(Serialize)]
struct Claims {
	sub: String,
	exp: u64,
}

fn token(user: u32) -> String {
	let exp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() + 3600;
	let claims = Claims { sub: user.to_string(), exp };
	encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

/// Memory store that counts calls and can simulate an outage
#[derive(Debug, Default)]
struct CountingStore {
	inner: ConfigAdapterMemory,
	calls: AtomicUsize,
	broken: bool,
}

impl CountingStore {
	fn broken() -> Self {
		Self { broken: true, ..Default::default() }
	}

	fn hit(&self) -> ClResult<()> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.broken { Err(Error::DbError) } else { Ok(()) }
	}
}

#[async_trait]
impl ConfigAdapter for CountingStore {
	async fn read_config(&self, user: UserId) -> ClResult<ConfigMap> {
		self.hit()?;
		self.inner.read_config(user).await
	}
	async fn set_key(&self, user: UserId, key: &str, value: &str) -> ClResult<KeyOutcome> {
		self.hit()?;
		self.inner.set_key(user, key, value).await
	}
	async fn unset_key(&self, user: UserId, key: &str) -> ClResult<KeyOutcome> {
		self.hit()?;
		self.inner.unset_key(user, key).await
	}
}

fn router(store: Arc<CountingStore>) -> Router {
	let mut builder = AppBuilder::new();
	builder
		.auth_adapter(Arc::new(AuthAdapterJwt::new(SECRET).unwrap()))
		.config_adapter(store);
	routes::init(builder.build().unwrap())
}

fn request(method: Method, uri: &str, user: Option<u32>, body: Option<Value>) -> Request<Body> {
	let mut builder = Request::builder().method(method).uri(uri);
	if let Some(user) = user {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(user)));
	}
	match body {
		Some(body) => builder
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap(),
		None => builder.body(Body::empty()).unwrap(),
	}
}

fn raw_request(method: Method, uri: &str, user: u32, body: &'static str) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header(header::AUTHORIZATION, format!("Bearer {}", token(user)))
		.body(Body::from(body))
		.unwrap()
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
	let res = router.clone().oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
	let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
	(status, body)
}

#[tokio::test]
async fn test_unauthenticated_requests_never_reach_store() {
	let store = Arc::new(CountingStore::default());
	let router = router(store.clone());

	let cases = [
		request(Method::GET, "/config", None, None),
		request(Method::GET, "/config/v2", None, None),
		request(Method::PATCH, "/config", None, Some(json!({"config": []}))),
		request(Method::PATCH, "/config/v2", None, Some(json!({"edit": {"a": "1"}}))),
		request(Method::PUT, "/config/a.b", None, None),
		request(Method::DELETE, "/config/a.b", None, None),
		request(Method::PUT, "/config/v2", None, None),
		request(Method::DELETE, "/config/v2", None, None),
	];
	for req in cases {
		let (status, _) = send(&router, req).await;
		assert_eq!(status, StatusCode::UNAUTHORIZED);
	}

	let req = Request::builder()
		.uri("/config")
		.header(header::AUTHORIZATION, "Bearer forged.token.value")
		.body(Body::empty())
		.unwrap();
	let (status, body) = send(&router, req).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["error"]["code"], "E-AUTH-UNAUTH");

	assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_v2_patch_then_read_both_shapes() {
	let router = router(Arc::new(CountingStore::default()));

	let patch = json!({"edit": {"b.x": "2", "a.y": "1"}});
	let (status, body) = send(&router, request(Method::PATCH, "/config/v2", Some(1), Some(patch))).await;
	assert_eq!(status, StatusCode::NO_CONTENT);
	assert_eq!(body, Value::Null);

	let (status, body) = send(&router, request(Method::GET, "/config/v2", Some(1), None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({"a.y": "1", "b.x": "2"}));

	let (status, body) = send(&router, request(Method::GET, "/config", Some(1), None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({"config": [{"key": "a.y", "value": "1"}, {"key": "b.x", "value": "2"}]})
	);
}

#[tokio::test]
async fn test_patch_failures_are_client_errors() {
	let router = router(Arc::new(CountingStore::default()));

	let patch = json!({"edit": {"a": "1", "bad key!": "x"}, "unset": ["missing"]});
	let (status, body) = send(&router, request(Method::PATCH, "/config/v2", Some(1), Some(patch))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!(["bad key!", "missing"]));

	let (_, body) = send(&router, request(Method::GET, "/config/v2", Some(1), None)).await;
	assert_eq!(body, json!({"a": "1"}));
}

#[tokio::test]
async fn test_legacy_patch_removes_null_entries() {
	let router = router(Arc::new(CountingStore::default()));

	let patch = json!({"edit": {"a.keep": "1", "a.drop": "2"}});
	send(&router, request(Method::PATCH, "/config/v2", Some(1), Some(patch))).await;

	let legacy = json!({"config": [
		{"key": "a.drop", "value": null},
		{"key": "a.new"},
		{"key": "a.new", "value": "3"},
		{"key": "a.keep", "value": "4"}
	]});
	let (status, _) = send(&router, request(Method::PATCH, "/config", Some(1), Some(legacy))).await;
	assert_eq!(status, StatusCode::NO_CONTENT);

	let (_, body) = send(&router, request(Method::GET, "/config/v2", Some(1), None)).await;
	assert_eq!(body, json!({"a.keep": "4", "a.new": "3"}));
}

#[tokio::test]
async fn test_legacy_patch_reports_missing_removal() {
	let router = router(Arc::new(CountingStore::default()));

	let legacy = json!({"config": [{"key": "a.missing", "value": null}]});
	let (status, body) = send(&router, request(Method::PATCH, "/config", Some(1), Some(legacy))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!(["a.missing"]));
}

#[tokio::test]
async fn test_single_key_set_and_unset() {
	let router = router(Arc::new(CountingStore::default()));

	let (status, _) = send(&router, raw_request(Method::PUT, "/config/plugin.path/with/slash", 1, "v1")).await;
	assert_eq!(status, StatusCode::OK);

	// Missing body sets an empty value rather than removing the key
	let (status, _) = send(&router, raw_request(Method::PUT, "/config/a.empty", 1, "")).await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = send(&router, request(Method::GET, "/config/v2", Some(1), None)).await;
	assert_eq!(body, json!({"a.empty": "", "plugin.path/with/slash": "v1"}));

	let (status, _) =
		send(&router, request(Method::DELETE, "/config/plugin.path/with/slash", Some(1), None)).await;
	assert_eq!(status, StatusCode::OK);

	let (status, _) = send(&router, request(Method::DELETE, "/config/a.gone", Some(1), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, body) = send(&router, raw_request(Method::PUT, "/config/_hidden", 1, "x")).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["code"], "E-VAL-INVALID");

	let (_, body) = send(&router, request(Method::GET, "/config/v2", Some(1), None)).await;
	assert_eq!(body, json!({"a.empty": ""}));
}

#[tokio::test]
async fn test_single_key_named_v2() {
	let router = router(Arc::new(CountingStore::default()));

	let (status, _) = send(&router, raw_request(Method::PUT, "/config/v2", 1, "second")).await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = send(&router, request(Method::GET, "/config/v2", Some(1), None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({"v2": "second"}));

	let (status, _) = send(&router, request(Method::DELETE, "/config/v2", Some(1), None)).await;
	assert_eq!(status, StatusCode::OK);

	let (status, _) = send(&router, request(Method::DELETE, "/config/v2", Some(1), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (_, body) = send(&router, request(Method::GET, "/config/v2", Some(1), None)).await;
	assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
	let router = router(Arc::new(CountingStore::broken()));

	let (status, body) = send(&router, request(Method::GET, "/config", Some(1), None)).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"]["code"], "E-CORE-DBERR");

	let (status, _) = send(&router, raw_request(Method::PUT, "/config/a.b", 1, "x")).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

	let (status, _) = send(&router, request(Method::DELETE, "/config/a.b", Some(1), None)).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

	let patch = json!({"edit": {"a.b": "1"}});
	let (status, _) = send(&router, request(Method::PATCH, "/config/v2", Some(1), Some(patch))).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_users_see_only_their_config() {
	let router = router(Arc::new(CountingStore::default()));

	let patch = json!({"edit": {"a.b": "mine"}});
	send(&router, request(Method::PATCH, "/config/v2", Some(1), Some(patch))).await;

	let (_, body) = send(&router, request(Method::GET, "/config/v2", Some(2), None)).await;
	assert_eq!(body, json!({}));

	let (_, body) = send(&router, request(Method::GET, "/config", Some(2), None)).await;
	assert_eq!(body, json!({"config": []}));
}

#[tokio::test]
async fn test_malformed_patch_body() {
	let store = Arc::new(CountingStore::default());
	let router = router(store.clone());

	let patch = json!({"edit": {"a.b": 1}});
	let (status, _) = send(&router, request(Method::PATCH, "/config/v2", Some(1), Some(patch))).await;
	assert!(status.is_client_error());
	assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_request_id_header() {
	let router = router(Arc::new(CountingStore::default()));

	let res = router.oneshot(request(Method::GET, "/config", Some(1), None)).await.unwrap();
	assert!(res.headers().contains_key("x-request-id"));
}

// vim: ts=4
