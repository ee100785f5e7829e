use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::incoming::use_cases::update_user::{
    UpdateUserCommand, UpdateUserUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    secret_hasher::SecretHasher, user_repository::UserRepository,
};
use crate::shared::error::{ApiError, StoreError};

pub struct UpdateUser {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn SecretHasher>,
}

impl UpdateUser {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl UpdateUserUseCase for UpdateUser {
    async fn execute(&self, command: UpdateUserCommand) -> Result<User, ApiError> {
        let mut user = self
            .users
            .find_by_id(command.id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No user with id {}.", command.id)))?;
        if let Some(first_name) = command.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = command.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(mail) = command.mail {
            user.mail = mail.trim().to_lowercase();
        }
        if let Some(secret) = command.secret {
            user.secret = self.hasher.hash(&secret).map_err(ApiError::internal)?;
        }
        if command.caller_is_admin {
            if let Some(admin_platform) = command.admin_platform {
                user.admin_platform = admin_platform;
            }
        }
        // The stored secret is already a hash, validation must not reject it.
        User::new(&user.first_name, &user.last_name, &user.mail, "x", false).is_valid()?;
        match self.users.save(&user).await {
            Ok(()) => Ok(user),
            Err(StoreError::Duplicate { .. }) => Err(ApiError::invalid(format!(
                "The email address {} is already used by another user.",
                user.mail
            ))),
            Err(other) => Err(other.into()),
        }
    }
}
