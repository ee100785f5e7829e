use async_trait::async_trait;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::shared::error::ApiError;

#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub title: String,
    pub description: String,
    pub encoder_name: String,
    pub encoder_string: String,
}

#[async_trait]
pub trait CreateProfileUseCase: Send + Sync {
    async fn execute(&self, command: CreateProfileCommand) -> Result<TransformProfile, ApiError>;
}
