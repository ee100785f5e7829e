use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::User;
use crate::shared::api::listing::ListQuery;
use crate::shared::error::ApiError;

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    async fn execute(&self, query: ListQuery) -> Result<Vec<User>, ApiError>;
}
