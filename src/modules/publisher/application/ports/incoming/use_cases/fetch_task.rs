use async_trait::async_trait;
use serde::Serialize;

use crate::modules::auth::application::domain::entities::UserView;
use crate::modules::media::application::domain::entities::Media;
use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::shared::error::ApiError;

#[derive(Debug, Serialize)]
pub struct PublisherTaskView {
    #[serde(flatten)]
    pub task: PublisherTask,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

#[async_trait]
pub trait FetchPublisherTaskUseCase: Send + Sync {
    async fn execute(&self, id: &str, load_fields: bool) -> Result<PublisherTaskView, ApiError>;
}
