use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::media::application::ports::incoming::use_cases::count_medias::CountMediasUseCase;
use crate::modules::media::application::services::media_service::MediaService;
use crate::shared::error::ApiError;

pub struct CountMedias {
    store: Arc<MediaService>,
}

impl CountMedias {
    pub fn new(store: Arc<MediaService>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CountMediasUseCase for CountMedias {
    async fn execute(&self, filter: Option<Value>) -> Result<u64, ApiError> {
        self.store.count_medias(filter).await
    }
}
