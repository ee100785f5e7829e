use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformTask;
use crate::shared::error::ApiError;

#[derive(Debug, Clone)]
pub struct LaunchTransformCommand {
    pub user_id: Uuid,
    pub media_in_id: Uuid,
    pub profile_id: Uuid,
    pub filename: String,
    pub metadata: Map<String, Value>,
    pub send_email: bool,
    pub queue: String,
    pub callback_path: String,
}

#[async_trait]
pub trait LaunchTransformUseCase: Send + Sync {
    async fn execute(&self, command: LaunchTransformCommand) -> Result<TransformTask, ApiError>;
}
