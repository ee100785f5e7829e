use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::media::application::domain::entities::{normalize_filename, Media};
use crate::modules::media::application::ports::incoming::use_cases::update_media::{
    UpdateMediaCommand, UpdateMediaUseCase,
};
use crate::modules::media::application::services::media_service::MediaService;
use crate::shared::error::ApiError;

pub struct UpdateMedia {
    store: Arc<MediaService>,
}

impl UpdateMedia {
    pub fn new(store: Arc<MediaService>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UpdateMediaUseCase for UpdateMedia {
    async fn execute(&self, command: UpdateMediaCommand) -> Result<Media, ApiError> {
        let mut media = self.store.get_media(command.id).await?;
        if media.user_id != command.caller_id {
            return Err(ApiError::forbidden(format!(
                "You are not allowed to modify media asset with id {}.",
                command.id
            )));
        }
        if let Some(filename) = command.filename {
            media.filename = normalize_filename(&filename);
        }
        if let Some(metadata) = command.metadata {
            media.metadata = metadata;
        }
        self.store.save_media(&mut media).await?;
        Ok(media)
    }
}
