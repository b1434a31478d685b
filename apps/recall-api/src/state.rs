use std::sync::Arc;

use recall_service::RecallService;
use recall_storage::{db::Db, qdrant::VectorIndex};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RecallService>,
}
impl AppState {
	pub async fn new(config: recall_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let index = VectorIndex::new(&config.storage.qdrant)?;

		index.ensure_collection().await?;

		let service = RecallService::new(config, db, index);

		Ok(Self { service: Arc::new(service) })
	}
}
