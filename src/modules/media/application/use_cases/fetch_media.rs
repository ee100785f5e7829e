use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::MediaView;
use crate::modules::media::application::ports::incoming::use_cases::fetch_media::FetchMediaUseCase;
use crate::modules::media::application::services::media_service::MediaService;
use crate::shared::error::ApiError;

pub struct FetchMedia {
    store: Arc<MediaService>,
}

impl FetchMedia {
    pub fn new(store: Arc<MediaService>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FetchMediaUseCase for FetchMedia {
    async fn execute(&self, id: Uuid, load_fields: bool) -> Result<MediaView, ApiError> {
        let media = self.store.get_media(id).await?;
        self.store.media_view(media, load_fields).await
    }
}
