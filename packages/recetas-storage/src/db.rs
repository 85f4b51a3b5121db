use std::time::Duration;

use sqlx::{
	Sqlite, SqlitePool, Transaction,
	sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use tokio::sync::{Mutex, MutexGuard};

use crate::{Result, schema};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Db {
	pub pool: SqlitePool,
	write_gate: Mutex<()>,
}
impl Db {
	pub async fn connect(cfg: &recetas_config::Sqlite) -> Result<Self> {
		let options = SqliteConnectOptions::new()
			.filename(&cfg.path)
			.create_if_missing(true)
			.journal_mode(SqliteJournalMode::Wal)
			.synchronous(SqliteSynchronous::Normal)
			.foreign_keys(true)
			.busy_timeout(BUSY_TIMEOUT);
		let pool = SqlitePoolOptions::new()
			.max_connections(cfg.pool_max_conns)
			.connect_with(options)
			.await?;

		tracing::debug!(path = %cfg.path, "Opened collection database.");

		Ok(Self { pool, write_gate: Mutex::new(()) })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let mut tx = self.pool.begin().await?;

		for statement in schema::statements() {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}

	/// Opens a write transaction. Writers queue on the gate, so at most one is open at a time.
	pub async fn begin_write(&self) -> Result<WriteTx<'_>> {
		let gate = self.write_gate.lock().await;
		let tx = self.pool.begin().await?;

		Ok(WriteTx { tx, _gate: gate })
	}
}

pub struct WriteTx<'a> {
	pub tx: Transaction<'static, Sqlite>,
	_gate: MutexGuard<'a, ()>,
}
impl WriteTx<'_> {
	pub async fn commit(self) -> Result<()> {
		self.tx.commit().await?;

		Ok(())
	}
}
