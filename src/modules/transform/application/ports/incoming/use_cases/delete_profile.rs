use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::shared::error::ApiError;

/// A profile referenced by a live task cannot disappear under it.
#[async_trait]
pub trait DeleteProfileUseCase: Send + Sync {
    async fn execute(&self, id: Uuid) -> Result<TransformProfile, ApiError>;
}
