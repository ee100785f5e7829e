use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::shared::error::ApiError;

#[derive(Debug, Clone)]
pub struct LaunchPublishCommand {
    pub user_id: Uuid,
    pub media_id: Uuid,
    pub send_email: bool,
    pub queue: String,
    pub callback_path: String,
}

#[async_trait]
pub trait LaunchPublishUseCase: Send + Sync {
    async fn execute(&self, command: LaunchPublishCommand) -> Result<PublisherTask, ApiError>;
}
