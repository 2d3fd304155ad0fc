//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS config (
		user_id integer NOT NULL,
		key text NOT NULL,
		value text NOT NULL,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
