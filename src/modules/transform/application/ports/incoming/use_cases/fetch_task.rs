use async_trait::async_trait;
use serde::Serialize;

use crate::modules::auth::application::domain::entities::UserView;
use crate::modules::media::application::domain::entities::Media;
use crate::modules::transform::application::domain::entities::{TransformProfile, TransformTask};
use crate::shared::error::ApiError;

/// Serialized task, optionally with the referenced entities embedded.
#[derive(Debug, Serialize)]
pub struct TransformTaskView {
    #[serde(flatten)]
    pub task: TransformTask,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_in: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_out: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<TransformProfile>,
}

#[async_trait]
pub trait FetchTransformTaskUseCase: Send + Sync {
    async fn execute(&self, id: &str, load_fields: bool) -> Result<TransformTaskView, ApiError>;
}
