use async_trait::async_trait;

use crate::shared::error::ApiError;

#[async_trait]
pub trait DestroyEnvironmentUseCase: Send + Sync {
    async fn execute(&self, name: &str) -> Result<(), ApiError>;
}
