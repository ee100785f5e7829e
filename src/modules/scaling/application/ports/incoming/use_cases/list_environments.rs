use async_trait::async_trait;
use serde_json::Value;

use crate::shared::error::ApiError;

#[async_trait]
pub trait ListEnvironmentsUseCase: Send + Sync {
    /// `{environments, default}`; with `with_status` each environment is
    /// expanded to its cluster status document.
    async fn execute(&self, with_status: bool) -> Result<Value, ApiError>;

    async fn count(&self) -> Result<usize, ApiError>;
}
