use async_trait::async_trait;

use crate::modules::publisher::application::ports::incoming::use_cases::fetch_task::PublisherTaskView;
use crate::shared::api::listing::ListQuery;
use crate::shared::error::ApiError;

#[async_trait]
pub trait ListPublisherTasksUseCase: Send + Sync {
    async fn execute(
        &self,
        query: ListQuery,
        load_fields: bool,
    ) -> Result<Vec<PublisherTaskView>, ApiError>;
}
