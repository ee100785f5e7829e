use async_trait::async_trait;

use crate::modules::media::application::domain::entities::MediaView;
use crate::shared::api::listing::ListQuery;
use crate::shared::error::ApiError;

#[async_trait]
pub trait ListMediasUseCase: Send + Sync {
    async fn execute(&self, query: ListQuery, load_fields: bool)
        -> Result<Vec<MediaView>, ApiError>;
}
