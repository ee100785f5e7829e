use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::incoming::use_cases::create_user::{
    CreateUserCommand, CreateUserUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    secret_hasher::SecretHasher, user_repository::UserRepository,
};
use crate::shared::error::{ApiError, StoreError};

pub struct CreateUser {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn SecretHasher>,
}

impl CreateUser {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl CreateUserUseCase for CreateUser {
    async fn execute(&self, command: CreateUserCommand) -> Result<User, ApiError> {
        let mut user = User::new(
            &command.first_name,
            &command.last_name,
            &command.mail,
            &command.secret,
            command.admin_platform,
        );
        user.is_valid()?;
        user.secret = self
            .hasher
            .hash(&command.secret)
            .map_err(ApiError::internal)?;
        match self.users.save(&user).await {
            Ok(()) => {
                info!(user = %user.name(), mail = %user.mail, "User created");
                Ok(user)
            }
            Err(StoreError::Duplicate { .. }) => Err(ApiError::invalid(format!(
                "The email address {} is already used by another user.",
                user.mail
            ))),
            Err(other) => Err(other.into()),
        }
    }
}
