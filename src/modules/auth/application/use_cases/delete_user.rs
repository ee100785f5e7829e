use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::incoming::use_cases::delete_user::DeleteUserUseCase;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::shared::error::ApiError;

pub struct DeleteUser {
    users: Arc<dyn UserRepository>,
}

impl DeleteUser {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl DeleteUserUseCase for DeleteUser {
    async fn execute(&self, id: Uuid) -> Result<User, ApiError> {
        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No user with id {id}.")))?;
        self.users.delete(id).await.map_err(ApiError::from)?;
        info!(user = %user.name(), "User deleted");
        Ok(user)
    }
}
