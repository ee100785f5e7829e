use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::Media;
use crate::shared::error::ApiError;

/// Flip an asset to DELETED and clean its storage. `caller_id` enforces the
/// owner-only rule of the API; internal callers pass `None`.
#[derive(Debug, Clone)]
pub struct DeleteMediaCommand {
    pub id: Uuid,
    pub caller_id: Option<Uuid>,
}

#[async_trait]
pub trait DeleteMediaUseCase: Send + Sync {
    async fn execute(&self, command: DeleteMediaCommand) -> Result<Media, ApiError>;
}
