mod catalog;
mod error;

pub use catalog::{CatalogFixture, StubCatalog, meal};
pub use error::{Error, Result};

use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use sqlx::{
	ConnectOptions, Connection,
	sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use uuid::Uuid;

/// A throwaway SQLite database file under the system temp directory.
///
/// The file and its WAL companions are removed on drop.
pub struct TestDatabase {
	name: String,
	path: PathBuf,
	cleaned: bool,
}
impl TestDatabase {
	pub async fn new() -> Result<Self> {
		let name = format!("recetas_test_{}", Uuid::new_v4().simple());
		let path = env::temp_dir().join(format!("{name}.sqlite"));
		let conn = SqliteConnectOptions::new()
			.filename(&path)
			.create_if_missing(true)
			.journal_mode(SqliteJournalMode::Wal)
			.connect()
			.await
			.map_err(|err| Error::Message(format!("Failed to create test database: {err}.")))?;

		conn.close().await?;

		Ok(Self { name, path, cleaned: false })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Path as a string, the shape the storage configuration expects.
	pub fn path_str(&self) -> String {
		self.path.to_string_lossy().into_owned()
	}

	pub fn dsn(&self) -> String {
		format!("sqlite://{}?mode=rwc", self.path.display())
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		for path in companion_files(&self.path) {
			match fs::remove_file(&path) {
				Ok(()) => {},
				Err(err) if err.kind() == io::ErrorKind::NotFound => {},
				Err(err) => return Err(err.into()),
			}
		}

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Test database cleanup failed: {err}.");
		}
	}
}

fn companion_files(path: &Path) -> [PathBuf; 3] {
	let raw = path.as_os_str().to_owned();
	let with_suffix = |suffix: &str| {
		let mut name = raw.clone();

		name.push(suffix);

		PathBuf::from(name)
	};

	[path.to_path_buf(), with_suffix("-wal"), with_suffix("-shm")]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn drop_removes_the_database_file() {
		let db = TestDatabase::new().await.expect("Failed to create test database.");
		let path = db.path().to_path_buf();

		assert!(path.exists());
		assert!(db.dsn().starts_with("sqlite://"));

		drop(db);

		assert!(!path.exists());
	}
}
