use async_trait::async_trait;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::shared::api::listing::ListQuery;
use crate::shared::error::ApiError;

#[async_trait]
pub trait ListProfilesUseCase: Send + Sync {
    async fn execute(&self, query: ListQuery) -> Result<Vec<TransformProfile>, ApiError>;
}
