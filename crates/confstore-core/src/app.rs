//! App state type

use std::sync::Arc;

use confstore_types::auth_adapter::AuthAdapter;
use confstore_types::config_adapter::ConfigAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub auth_adapter: Arc<dyn AuthAdapter>,
	pub config_adapter: Arc<dyn ConfigAdapter>,
}

pub type App = Arc<AppState>;

#[derive(Default)]
pub struct Adapters {
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
	pub config_adapter: Option<Arc<dyn ConfigAdapter>>,
}

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Maximum accepted request body size in bytes
	pub body_limit: usize,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self { listen: "127.0.0.1:8080".into(), body_limit: 4 * 1024 * 1024 }
	}
}

// vim: ts=4
