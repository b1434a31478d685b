/// Persisted note row. `text` holds the generated summary, not the raw
/// submission that produced it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Note {
	pub id: i64,
	pub text: String,
}
