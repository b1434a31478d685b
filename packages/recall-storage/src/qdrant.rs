use qdrant_client::{
	Payload, Qdrant,
	qdrant::{
		CreateCollectionBuilder, Distance, PointId, PointStruct, QueryPointsBuilder,
		UpsertPointsBuilder, VectorParamsBuilder, point_id::PointIdOptions,
	},
};

use crate::{Error, Result};

/// One nearest-neighbor hit. `note_id` mirrors the Postgres row id; `score`
/// is the cosine similarity reported by the index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteMatch {
	pub note_id: i64,
	pub score: f32,
}

pub struct VectorIndex {
	pub client: Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl VectorIndex {
	pub fn new(cfg: &recall_config::Qdrant) -> Result<Self> {
		let client = Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(&self.collection).await? {
			return Ok(());
		}

		let builder = CreateCollectionBuilder::new(self.collection.clone()).vectors_config(
			VectorParamsBuilder::new(u64::from(self.vector_dim), Distance::Cosine),
		);

		self.client.create_collection(builder).await?;

		Ok(())
	}

	/// Upserts the embedding for a note, keyed by the note's row id. The row
	/// must already exist; the index entry is always created after it.
	pub async fn upsert_note(&self, note_id: i64, vector: Vec<f32>) -> Result<()> {
		let point_id = u64::try_from(note_id).map_err(|_| {
			Error::InvalidArgument(format!("Note id {note_id} is not a valid point id."))
		})?;

		if vector.len() != self.vector_dim as usize {
			return Err(Error::InvalidArgument(format!(
				"Embedding dimension {} does not match configured vector_dim {}.",
				vector.len(),
				self.vector_dim
			)));
		}

		let point = PointStruct::new(point_id, vector, Payload::new());
		let upsert = UpsertPointsBuilder::new(self.collection.clone(), vec![point]).wait(true);

		self.client.upsert_points(upsert).await?;

		Ok(())
	}

	/// Returns the `top_k` nearest neighbors of `vector`, best first.
	pub async fn query(&self, vector: Vec<f32>, top_k: u32) -> Result<Vec<NoteMatch>> {
		let query = QueryPointsBuilder::new(self.collection.clone())
			.query(vector)
			.limit(u64::from(top_k));
		let response = self.client.query(query).await?;
		let mut matches = Vec::with_capacity(response.result.len());

		for point in response.result {
			let Some(note_id) = numeric_point_id(point.id.as_ref()) else {
				return Err(Error::InvalidArgument(
					"Vector index returned a non-numeric point id.".to_string(),
				));
			};

			matches.push(NoteMatch { note_id, score: point.score });
		}

		Ok(matches)
	}
}

fn numeric_point_id(id: Option<&PointId>) -> Option<i64> {
	match id?.point_id_options.as_ref()? {
		PointIdOptions::Num(num) => i64::try_from(*num).ok(),
		PointIdOptions::Uuid(_) => None,
	}
}
