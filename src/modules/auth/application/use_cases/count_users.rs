use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::auth::application::ports::incoming::use_cases::count_users::CountUsersUseCase;
use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::shared::error::ApiError;

pub struct CountUsers {
    users: Arc<dyn UserRepository>,
}

impl CountUsers {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CountUsersUseCase for CountUsers {
    async fn execute(&self, filter: Option<Value>) -> Result<u64, ApiError> {
        self.users.count(filter).await.map_err(ApiError::from)
    }
}
