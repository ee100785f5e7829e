use async_trait::async_trait;

use crate::shared::error::ApiError;

/// Unpublish finished: the task is resolved through its `revoke_task_id`.
#[async_trait]
pub trait RevokeCallbackUseCase: Send + Sync {
    async fn execute(&self, revoke_task_id: &str, status: &str) -> Result<(), ApiError>;
}
