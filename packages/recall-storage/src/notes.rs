use sqlx::PgPool;

use crate::{Result, models::Note};

/// Inserts a summary row and returns the generated id, or `None` when the
/// insert yielded no row.
pub async fn insert_note(pool: &PgPool, text: &str) -> Result<Option<i64>> {
	let id = sqlx::query_scalar::<_, i64>("INSERT INTO notes (text) VALUES ($1) RETURNING id")
		.bind(text)
		.fetch_optional(pool)
		.await?;

	Ok(id)
}

/// Fetches notes for the given ids with a bound `ANY` list. Missing ids are
/// silently absent from the result.
pub async fn fetch_notes_by_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<Note>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let notes =
		sqlx::query_as::<_, Note>("SELECT id, text FROM notes WHERE id = ANY($1) ORDER BY id")
			.bind(ids)
			.fetch_all(pool)
			.await?;

	Ok(notes)
}
