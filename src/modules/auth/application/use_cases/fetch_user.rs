use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::incoming::use_cases::fetch_user::FetchUserUseCase;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::shared::error::ApiError;

pub struct FetchUser {
    users: Arc<dyn UserRepository>,
}

impl FetchUser {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl FetchUserUseCase for FetchUser {
    async fn execute(&self, id: Uuid) -> Result<User, ApiError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No user with id {id}.")))
    }
}
