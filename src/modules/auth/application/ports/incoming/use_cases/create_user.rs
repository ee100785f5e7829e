use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::User;
use crate::shared::error::ApiError;

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub first_name: String,
    pub last_name: String,
    pub mail: String,
    pub secret: String,
    pub admin_platform: bool,
}

#[async_trait]
pub trait CreateUserUseCase: Send + Sync {
    async fn execute(&self, command: CreateUserCommand) -> Result<User, ApiError>;
}
