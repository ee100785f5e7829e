use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::modules::media::application::domain::entities::Media;
use crate::shared::error::ApiError;

/// Only the metadata and filename of an asset may change after upload, and
/// only its owner may touch it.
#[derive(Debug, Default, Clone)]
pub struct UpdateMediaCommand {
    pub id: Uuid,
    pub caller_id: Uuid,
    pub filename: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

#[async_trait]
pub trait UpdateMediaUseCase: Send + Sync {
    async fn execute(&self, command: UpdateMediaCommand) -> Result<Media, ApiError>;
}
