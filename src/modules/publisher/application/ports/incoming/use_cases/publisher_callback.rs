use async_trait::async_trait;

use crate::modules::transform::application::ports::incoming::use_cases::transform_callback::ProgressUpdate;
use crate::shared::error::ApiError;

#[derive(Debug, Clone)]
pub struct PublisherCallbackCommand {
    pub task_id: String,
    pub publish_uri: Option<String>,
    pub status: String,
    pub progress: ProgressUpdate,
}

#[async_trait]
pub trait PublisherCallbackUseCase: Send + Sync {
    async fn execute(&self, command: PublisherCallbackCommand) -> Result<(), ApiError>;
}
