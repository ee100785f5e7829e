use async_trait::async_trait;
use serde_json::Value;

use crate::shared::error::ApiError;

#[async_trait]
pub trait CountPublisherTasksUseCase: Send + Sync {
    async fn execute(&self, filter: Option<Value>) -> Result<u64, ApiError>;
}
