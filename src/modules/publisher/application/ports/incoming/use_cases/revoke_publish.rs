use async_trait::async_trait;

use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::shared::error::ApiError;

/// Revoke a publication. A successful publication is torn down through an
/// unpublish job on the worker serving the copy; anything not yet successful
/// is revoked in place.
#[derive(Debug, Clone)]
pub struct RevokePublishCommand {
    pub task_id: String,
    pub callback_path: String,
    pub terminate: bool,
    pub remove: bool,
}

#[async_trait]
pub trait RevokePublishUseCase: Send + Sync {
    async fn execute(&self, command: RevokePublishCommand) -> Result<PublisherTask, ApiError>;
}
