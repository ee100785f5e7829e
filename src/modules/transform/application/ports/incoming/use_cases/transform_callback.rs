use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::shared::error::ApiError;

/// Optional measurements a progress callback may carry.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProgressUpdate {
    pub percent: Option<Value>,
    pub elapsed_time: Option<Value>,
    pub eta_time: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct TransformCallbackCommand {
    pub task_id: String,
    pub status: String,
    pub progress: ProgressUpdate,
}

#[async_trait]
pub trait TransformCallbackUseCase: Send + Sync {
    async fn execute(&self, command: TransformCallbackCommand) -> Result<(), ApiError>;
}
