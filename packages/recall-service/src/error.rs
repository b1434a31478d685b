pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure taxonomy of the two pipelines. `InvalidInput` is the only
/// client-class condition; everything else surfaces as a server error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid input: {message}")]
	InvalidInput { message: String },
	#[error("Generation failure: {message}")]
	GenerationFailure { message: String },
	#[error("Embedding failure: {message}")]
	EmbeddingFailure { message: String },
	#[error("Persistence failure: {message}")]
	PersistenceFailure { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Index error: {message}")]
	Index { message: String },
}
impl Error {
	/// Stable machine-readable code used in per-item ingest reports and HTTP
	/// error bodies.
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidInput { .. } => "invalid_input",
			Self::GenerationFailure { .. } => "generation_failure",
			Self::EmbeddingFailure { .. } => "embedding_failure",
			Self::PersistenceFailure { .. } => "persistence_failure",
			Self::Storage { .. } => "storage_error",
			Self::Index { .. } => "index_error",
		}
	}
}

impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<recall_storage::Error> for Error {
	fn from(err: recall_storage::Error) -> Self {
		match err {
			recall_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			recall_storage::Error::InvalidArgument(message) => Self::Index { message },
			recall_storage::Error::Qdrant(inner) => Self::Index { message: inner.to_string() },
		}
	}
}
