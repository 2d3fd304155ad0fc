use std::{env, path, sync::Arc};

use confstore::{
	config_adapter::ConfigAdapter,
	error::{ClResult, Error},
	AppBuilder,
};
use confstore_auth_adapter_jwt::AuthAdapterJwt;
use confstore_config_adapter_memory::ConfigAdapterMemory;
use confstore_config_adapter_sqlite::ConfigAdapterSqlite;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub store: String,
	pub jwt_secret: String,
}

impl Config {
	fn from_env() -> ClResult<Self> {
		Ok(Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			store: env::var("STORE").unwrap_or_else(|_| "sqlite".to_string()),
			jwt_secret: env::var("JWT_SECRET")
				.map_err(|_| Error::ConfigError("JWT_SECRET is not set".into()))?,
		})
	}
}

#[tokio::main]
async fn main() -> ClResult<()> {
	// Builder first so configuration errors below are logged
	let mut builder = AppBuilder::new();
	let config = Config::from_env()?;

	let config_adapter: Arc<dyn ConfigAdapter> = match config.store.as_str() {
		"sqlite" => Arc::new(ConfigAdapterSqlite::new(&config.db_dir).await?),
		"memory" => Arc::new(ConfigAdapterMemory::new()),
		other => return Err(Error::ConfigError(format!("unknown STORE backend: {}", other))),
	};

	builder
		.listen(config.listen.as_str())
		.auth_adapter(Arc::new(AuthAdapterJwt::new(config.jwt_secret.as_bytes())?))
		.config_adapter(config_adapter);
	builder.run().await
}

// vim: ts=4
