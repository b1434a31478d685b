use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, RecallService, Result};

pub const SUMMARIZE_PROMPT: &str = "You are a friendly summarization assistant. Take the input \
	text and return a summary in three sentences. Please keep your responses concise and limit \
	them to a maximum of 500 tokens. If a summary exceeds this limit, kindly provide the most \
	relevant information within the given constraint.";

/// Batch of raw text submissions. The wire shape is a bare JSON array; the
/// legacy single-string body is not accepted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngestRequest {
	pub texts: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngestResponse {
	pub results: Vec<IngestItemResult>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestItemResult {
	pub id: Option<i64>,
	pub summary: Option<String>,
	pub inserted: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}
impl IngestItemResult {
	fn failure(err: &Error) -> Self {
		Self {
			id: None,
			summary: None,
			inserted: false,
			error_code: Some(err.code().to_string()),
			message: Some(err.to_string()),
		}
	}
}

impl RecallService {
	/// Runs the summarize, embed, persist, index pipeline for every item.
	///
	/// Items are processed concurrently and independently; a failed item is
	/// reported in its slot of the response and never fails the batch. There
	/// is no transaction spanning the row store and the vector index.
	pub async fn ingest(&self, req: IngestRequest) -> Result<IngestResponse> {
		if req.texts.is_empty() {
			return Err(Error::InvalidInput { message: "Texts list is empty.".to_string() });
		}

		let items = req.texts.iter().map(|text| self.ingest_item(text));
		let results = join_all(items)
			.await
			.into_iter()
			.map(|result| result.unwrap_or_else(|err| IngestItemResult::failure(&err)))
			.collect();

		Ok(IngestResponse { results })
	}

	async fn ingest_item(&self, text: &str) -> Result<IngestItemResult> {
		if text.trim().is_empty() {
			return Err(Error::InvalidInput { message: "Missing text.".to_string() });
		}

		let summary = self.summarize(text).await?;
		// The summary is what gets embedded and stored; the raw submission is
		// dropped here.
		let vector = self.embed_summary(&summary).await?;
		let id = recall_storage::notes::insert_note(&self.db.pool, &summary)
			.await?
			.ok_or_else(|| Error::PersistenceFailure {
				message: "Failed to create note.".to_string(),
			})?;

		// The empty-embedding check runs only after the row exists, so a note
		// without an index entry is possible. Accepted and not compensated.
		let Some(vector) = vector else {
			tracing::warn!(note_id = id, "No embedding produced; note row has no index entry.");

			return Err(Error::EmbeddingFailure {
				message: "Failed to generate vector embedding.".to_string(),
			});
		};

		self.index.upsert_note(id, vector).await?;

		Ok(IngestItemResult {
			id: Some(id),
			summary: Some(summary),
			inserted: true,
			error_code: None,
			message: None,
		})
	}

	async fn summarize(&self, text: &str) -> Result<String> {
		let messages = summarize_messages(text);

		match self.providers.generation.generate(&self.cfg.providers.summarizer, &messages).await {
			Ok(summary) => Ok(summary),
			Err(err) => {
				tracing::error!(error = %err, "Failed to summarize text.");

				Err(Error::GenerationFailure {
					message: "Failed to summarize text.".to_string(),
				})
			},
		}
	}

	async fn embed_summary(&self, summary: &str) -> Result<Option<Vec<f32>>> {
		let inputs = [summary.to_string()];
		let vectors = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &inputs)
			.await
			.map_err(|err| Error::EmbeddingFailure { message: err.to_string() })?;

		Ok(vectors.into_iter().next())
	}
}

pub(crate) fn summarize_messages(text: &str) -> Vec<Value> {
	vec![
		serde_json::json!({ "role": "system", "content": SUMMARIZE_PROMPT }),
		serde_json::json!({ "role": "user", "content": text }),
	]
}
