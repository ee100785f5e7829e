use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::MediaView;
use crate::shared::error::ApiError;

#[async_trait]
pub trait FetchMediaUseCase: Send + Sync {
    /// `load_fields` resolves `user_id`/`parent_id` into embedded payloads.
    async fn execute(&self, id: Uuid, load_fields: bool) -> Result<MediaView, ApiError>;
}
