use async_trait::async_trait;

use crate::modules::transform::application::domain::entities::TransformTask;
use crate::shared::error::ApiError;

/// Revoke a task: flag it, broadcast a best-effort cancellation, optionally
/// delete the output media. `remove` erases the row and exists for tests.
#[derive(Debug, Clone)]
pub struct RevokeTransformCommand {
    pub task_id: String,
    pub terminate: bool,
    pub remove: bool,
    pub delete_media: bool,
}

#[async_trait]
pub trait RevokeTransformUseCase: Send + Sync {
    async fn execute(&self, command: RevokeTransformCommand) -> Result<TransformTask, ApiError>;
}
