use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::shared::error::ApiError;

/// Absent fields are untouched. `admin_platform` is only honoured when the
/// caller is a platform administrator.
#[derive(Debug, Default, Clone)]
pub struct UpdateUserCommand {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mail: Option<String>,
    pub secret: Option<String>,
    pub admin_platform: Option<bool>,
    pub caller_is_admin: bool,
}

#[async_trait]
pub trait UpdateUserUseCase: Send + Sync {
    async fn execute(&self, command: UpdateUserCommand) -> Result<User, ApiError>;
}
