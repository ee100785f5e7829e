use async_trait::async_trait;
use serde_json::Value;

use crate::shared::error::ApiError;

#[async_trait]
pub trait FetchEnvironmentUseCase: Send + Sync {
    async fn execute(&self, name: &str) -> Result<Value, ApiError>;
}
