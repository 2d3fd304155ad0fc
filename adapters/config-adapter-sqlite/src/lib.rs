//! SQLite configuration adapter.
//!
//! Stores one row per (user, key). Every operation is a single statement, so
//! each key is changed atomically while a patch as a whole is not.

use async_trait::async_trait;
use sqlx::{
	sqlite::{self, SqlitePool},
	Row,
};
use std::path::Path;

use confstore_types::{
	config_adapter::{self, ConfigAdapter, KeyOutcome, KeyRejection},
	prelude::*,
	types::ConfigMap,
};

mod schema;

const DB_FILE: &str = "config.db";

fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

#[derive(Debug)]
pub struct ConfigAdapterSqlite {
	db: SqlitePool,
}

impl ConfigAdapterSqlite {
	/// Opens (or creates) the database inside `dir`
	pub async fn new(dir: impl AsRef<Path>) -> ClResult<Self> {
		tokio::fs::create_dir_all(dir.as_ref()).await?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.as_ref().join(DB_FILE))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

		info!("Config database opened in {}", dir.as_ref().display());
		Ok(Self { db })
	}
}

#[async_trait]
impl ConfigAdapter for ConfigAdapterSqlite {
	async fn read_config(&self, user: UserId) -> ClResult<ConfigMap> {
		let rows = sqlx::query("SELECT key, value FROM config WHERE user_id = ? ORDER BY key")
			.bind(user.0)
			.fetch_all(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		let mut config = ConfigMap::new();
		for row in rows {
			let key: String = row.try_get("key").inspect_err(inspect).map_err(|_| Error::DbError)?;
			let value: String =
				row.try_get("value").inspect_err(inspect).map_err(|_| Error::DbError)?;
			config.insert(key.into_boxed_str(), value.into_boxed_str());
		}

		Ok(config)
	}

	async fn set_key(&self, user: UserId, key: &str, value: &str) -> ClResult<KeyOutcome> {
		if let Err(rejection) = config_adapter::validate_entry(key, value) {
			return Ok(KeyOutcome::Rejected(rejection));
		}

		sqlx::query(
			"INSERT INTO config (user_id, key, value) VALUES (?, ?, ?)
			ON CONFLICT(user_id, key) DO UPDATE SET value = excluded.value, updated_at = unixepoch()",
		)
		.bind(user.0)
		.bind(key)
		.bind(value)
		.execute(&self.db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

		Ok(KeyOutcome::Applied)
	}

	async fn unset_key(&self, user: UserId, key: &str) -> ClResult<KeyOutcome> {
		if let Err(rejection) = config_adapter::validate_key(key) {
			return Ok(KeyOutcome::Rejected(rejection));
		}

		let res = sqlx::query("DELETE FROM config WHERE user_id = ? AND key = ?")
			.bind(user.0)
			.bind(key)
			.execute(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		if res.rows_affected() == 0 {
			Ok(KeyOutcome::Rejected(KeyRejection::NotFound))
		} else {
			Ok(KeyOutcome::Applied)
		}
	}
}

// vim: ts=4
