//! App builder - constructs and runs the confstore application

use std::sync::Arc;

use crate::auth_adapter::AuthAdapter;
use crate::config_adapter::ConfigAdapter;
use crate::prelude::*;
use crate::webserver;
pub use confstore_core::app::{Adapters, App, AppBuilderOpts, AppState, VERSION};

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		let filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
		// A subscriber may already be installed (several builders in one process)
		let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();

		AppBuilder { opts: AppBuilderOpts::default(), adapters: Adapters::default() }
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn body_limit(&mut self, body_limit: usize) -> &mut Self {
		self.opts.body_limit = body_limit;
		self
	}

	// Adapters
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}
	pub fn config_adapter(&mut self, config_adapter: Arc<dyn ConfigAdapter>) -> &mut Self {
		self.adapters.config_adapter = Some(config_adapter);
		self
	}

	/// Assembles the shared state. Fails if an adapter is missing.
	pub fn build(self) -> ClResult<App> {
		let Some(auth_adapter) = self.adapters.auth_adapter else {
			error!("FATAL: No auth adapter configured");
			return Err(Error::ConfigError("No auth adapter configured".to_string()));
		};
		let Some(config_adapter) = self.adapters.config_adapter else {
			error!("FATAL: No config adapter configured");
			return Err(Error::ConfigError("No config adapter configured".to_string()));
		};

		Ok(Arc::new(AppState { opts: self.opts, auth_adapter, config_adapter }))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("confstore V{}", VERSION);

		let app = self.build()?;
		webserver::serve(app).await
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
