use recetas_domain::validate::Rejection;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Catalog error: {message}")]
	Catalog { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<Rejection> for Error {
	fn from(err: Rejection) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}

impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<recetas_storage::Error> for Error {
	fn from(err: recetas_storage::Error) -> Self {
		match err {
			recetas_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			recetas_storage::Error::InvalidData(message) => Self::Storage { message },
		}
	}
}

impl From<recetas_catalog::Error> for Error {
	fn from(err: recetas_catalog::Error) -> Self {
		Self::Catalog { message: err.to_string() }
	}
}
