use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::shared::error::ApiError;

#[async_trait]
pub trait FetchUserUseCase: Send + Sync {
    async fn execute(&self, id: Uuid) -> Result<User, ApiError>;
}
