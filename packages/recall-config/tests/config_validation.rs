use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use recall_config::Config;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("recall_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_mutated<F>(mutate: F) -> recall_config::Result<Config>
where
	F: FnOnce(&mut toml::Table),
{
	let path = write_temp_config(sample_toml(mutate));
	let result = recall_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn set_retrieval(root: &mut toml::Table, key: &str, value: Value) {
	let retrieval = root
		.get_mut("retrieval")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [retrieval].");

	retrieval.insert(key.to_string(), value);
}

#[test]
fn loads_template_config() {
	let cfg = load_mutated(|_| {}).expect("Expected template config to load.");

	assert_eq!(cfg.retrieval.similarity_cutoff, 0.75);
	assert_eq!(cfg.retrieval.top_k, 1);
	assert_eq!(cfg.retrieval.default_question, "How can you help?");
}

#[test]
fn retrieval_defaults_apply_when_section_is_absent() {
	let cfg = load_mutated(|root| {
		root.remove("retrieval");
	})
	.expect("Expected config without [retrieval] to load.");

	assert_eq!(cfg.retrieval.similarity_cutoff, 0.75);
	assert_eq!(cfg.retrieval.top_k, 1);
}

#[test]
fn rejects_dimension_mismatch() {
	let err = load_mutated(|root| {
		let embedding = root
			.get_mut("providers")
			.and_then(Value::as_table_mut)
			.and_then(|providers| providers.get_mut("embedding"))
			.and_then(Value::as_table_mut)
			.expect("Template config must include [providers.embedding].");

		embedding.insert("dimensions".to_string(), Value::Integer(1_024));
	})
	.expect_err("Expected dimension mismatch to fail validation.");

	assert!(err.to_string().contains("must match storage.qdrant.vector_dim"));
}

#[test]
fn rejects_cutoff_of_one_or_more() {
	let err = load_mutated(|root| {
		set_retrieval(root, "similarity_cutoff", Value::Float(1.0));
	})
	.expect_err("Expected cutoff of 1.0 to fail validation.");

	assert!(err.to_string().starts_with("Invalid config: "));
	assert!(err.to_string().contains("retrieval.similarity_cutoff"));
}

#[test]
fn read_errors_name_the_config_path() {
	let err = recall_config::load(std::path::Path::new("/nonexistent/recall.toml"))
		.expect_err("Expected missing config to fail loading.");

	assert!(err.to_string().contains("recall config"));
	assert!(err.to_string().contains("/nonexistent/recall.toml"));
}

#[test]
fn rejects_zero_top_k() {
	let err = load_mutated(|root| {
		set_retrieval(root, "top_k", Value::Integer(0));
	})
	.expect_err("Expected top_k of zero to fail validation.");

	assert!(err.to_string().contains("retrieval.top_k"));
}

#[test]
fn blank_default_question_falls_back() {
	let cfg = load_mutated(|root| {
		set_retrieval(root, "default_question", Value::String("   ".to_string()));
	})
	.expect("Expected blank default question to load.");

	assert_eq!(cfg.retrieval.default_question, "How can you help?");
}

#[test]
fn rejects_empty_api_key() {
	let err = load_mutated(|root| {
		let chat = root
			.get_mut("providers")
			.and_then(Value::as_table_mut)
			.and_then(|providers| providers.get_mut("chat"))
			.and_then(Value::as_table_mut)
			.expect("Template config must include [providers.chat].");

		chat.insert("api_key".to_string(), Value::String(String::new()));
	})
	.expect_err("Expected empty api_key to fail validation.");

	assert!(err.to_string().contains("Provider chat api_key must be non-empty."));
}
