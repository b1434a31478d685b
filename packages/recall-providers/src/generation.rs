use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Response contract of the generation capability. OpenAI-compatible backends
/// answer through `choices[0].message.content`; some gateways answer through a
/// bare top-level `response` field. Both are accepted.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
	#[serde(default)]
	choices: Vec<Choice>,
	#[serde(default)]
	response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
	message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
	content: Option<String>,
}

/// Runs one chat-completion turn and returns the generated text.
///
/// An empty or missing completion is an error; callers decide whether that is
/// fatal for their pipeline.
pub async fn generate(cfg: &recall_config::LlmProviderConfig, messages: &[Value]) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let response: GenerationResponse = res
		.error_for_status()?
		.json()
		.await
		.map_err(|err| eyre::eyre!("Generation response did not match the chat contract: {err}."))?;

	extract_text(response)
}

fn extract_text(response: GenerationResponse) -> Result<String> {
	let text = response
		.choices
		.into_iter()
		.next()
		.and_then(|choice| choice.message.content)
		.or(response.response)
		.ok_or_else(|| eyre::eyre!("Generation response contains no completion text."))?;

	if text.trim().is_empty() {
		return Err(eyre::eyre!("Generation response text is empty."));
	}

	Ok(text)
}
