use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, RecallService, Result};
use recall_storage::qdrant::NoteMatch;

pub const ANSWER_PROMPT: &str = "When answering the question or responding, use the context \
	provided, if it is provided and relevant.";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AskRequest {
	pub text: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AskResponse {
	pub answer: String,
}

impl RecallService {
	/// Answers a question grounded in the nearest stored note, when one is
	/// similar enough.
	///
	/// No local recovery: capability and storage failures propagate to the
	/// boundary as-is.
	pub async fn ask(&self, req: AskRequest) -> Result<AskResponse> {
		let question = req
			.text
			.filter(|text| !text.trim().is_empty())
			.unwrap_or_else(|| self.cfg.retrieval.default_question.clone());
		let inputs = [question.clone()];
		let vectors = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &inputs)
			.await
			.map_err(|err| Error::EmbeddingFailure { message: err.to_string() })?;
		let Some(vector) = vectors.into_iter().next() else {
			return Err(Error::EmbeddingFailure {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};
		let matches = self.index.query(vector, self.cfg.retrieval.top_k).await?;
		let ids = filter_matches(&matches, self.cfg.retrieval.similarity_cutoff);
		let notes = recall_storage::notes::fetch_notes_by_ids(&self.db.pool, &ids).await?;
		let texts: Vec<String> = notes.into_iter().map(|note| note.text).collect();
		let context = context_block(&texts);
		let messages = answer_messages(context.as_deref(), &question);
		let answer = self
			.providers
			.generation
			.generate(&self.cfg.providers.chat, &messages)
			.await
			.map_err(|err| Error::GenerationFailure { message: err.to_string() })?;

		Ok(AskResponse { answer })
	}
}

/// Keeps ids whose score is strictly greater than the cutoff. A score equal
/// to the cutoff is not similar enough.
pub(crate) fn filter_matches(matches: &[NoteMatch], cutoff: f32) -> Vec<i64> {
	matches
		.iter()
		.filter(|candidate| candidate.score > cutoff)
		.map(|candidate| candidate.note_id)
		.collect()
}

/// Formats retrieved note texts as a bulleted context block, or `None` when
/// nothing was retrieved. An empty block is never sent as a message.
pub(crate) fn context_block(notes: &[String]) -> Option<String> {
	if notes.is_empty() {
		return None;
	}

	let bullets = notes.iter().map(|note| format!("- {note}")).collect::<Vec<_>>().join("\n");

	Some(format!("Context:\n{bullets}"))
}

pub(crate) fn answer_messages(context: Option<&str>, question: &str) -> Vec<Value> {
	let mut messages = Vec::with_capacity(3);

	if let Some(context) = context {
		messages.push(serde_json::json!({ "role": "system", "content": context }));
	}

	messages.push(serde_json::json!({ "role": "system", "content": ANSWER_PROMPT }));
	messages.push(serde_json::json!({ "role": "user", "content": question }));

	messages
}
