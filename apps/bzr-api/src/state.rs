use std::sync::Arc;

use bzr_service::BzrService;
use bzr_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<BzrService>,
}
impl AppState {
	pub async fn new(config: bzr_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(BzrService::new(config, db)))
	}

	pub fn from_service(service: BzrService) -> Self {
		Self { service: Arc::new(service) }
	}
}
