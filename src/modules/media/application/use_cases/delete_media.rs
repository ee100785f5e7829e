use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::media::application::domain::entities::Media;
use crate::modules::media::application::ports::incoming::use_cases::delete_media::{
    DeleteMediaCommand, DeleteMediaUseCase,
};
use crate::modules::media::application::services::media_service::MediaService;
use crate::shared::error::ApiError;

pub struct DeleteMedia {
    store: Arc<MediaService>,
}

impl DeleteMedia {
    pub fn new(store: Arc<MediaService>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DeleteMediaUseCase for DeleteMedia {
    async fn execute(&self, command: DeleteMediaCommand) -> Result<Media, ApiError> {
        let media = self.store.get_media(command.id).await?;
        if let Some(caller_id) = command.caller_id {
            if media.user_id != caller_id {
                return Err(ApiError::forbidden(format!(
                    "You are not allowed to delete media asset with id {}.",
                    command.id
                )));
            }
        }
        self.store.delete_media(media).await
    }
}
