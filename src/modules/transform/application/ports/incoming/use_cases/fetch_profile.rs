use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::shared::error::ApiError;

#[async_trait]
pub trait FetchProfileUseCase: Send + Sync {
    async fn execute(&self, id: Uuid) -> Result<TransformProfile, ApiError>;
}
