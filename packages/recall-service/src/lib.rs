pub mod ask;
pub mod ingest;

mod error;

pub use ask::{ANSWER_PROMPT, AskRequest, AskResponse};
pub use error::{Error, Result};
pub use ingest::{IngestItemResult, IngestRequest, IngestResponse, SUMMARIZE_PROMPT};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use recall_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use recall_providers::{embedding, generation};
use recall_storage::{db::Db, qdrant::VectorIndex};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub generation: Arc<dyn GenerationProvider>,
}

/// The orchestration core: one ingest pipeline and one ask pipeline over the
/// three external capabilities. Holds no request state of its own.
pub struct RecallService {
	pub cfg: Config,
	pub db: Db,
	pub index: VectorIndex,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(generation::generate(cfg, messages))
	}
}

impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		generation: Arc<dyn GenerationProvider>,
	) -> Self {
		Self { embedding, generation }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), generation: provider }
	}
}

impl RecallService {
	pub fn new(cfg: Config, db: Db, index: VectorIndex) -> Self {
		Self { cfg, db, index, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, index: VectorIndex, providers: Providers) -> Self {
		Self { cfg, db, index, providers }
	}
}
