use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::modules::media::application::domain::entities::Media;
use crate::shared::error::ApiError;

/// Register an asset already uploaded to the shared storage staging area.
#[derive(Debug, Clone)]
pub struct RegisterMediaCommand {
    pub user_id: Uuid,
    pub uri: String,
    pub filename: String,
    pub metadata: Map<String, Value>,
}

#[async_trait]
pub trait RegisterMediaUseCase: Send + Sync {
    async fn execute(&self, command: RegisterMediaCommand) -> Result<Media, ApiError>;
}
