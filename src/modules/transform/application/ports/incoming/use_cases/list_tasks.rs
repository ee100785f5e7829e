use async_trait::async_trait;

use crate::modules::transform::application::ports::incoming::use_cases::fetch_task::TransformTaskView;
use crate::shared::api::listing::ListQuery;
use crate::shared::error::ApiError;

#[async_trait]
pub trait ListTransformTasksUseCase: Send + Sync {
    async fn execute(
        &self,
        query: ListQuery,
        load_fields: bool,
    ) -> Result<Vec<TransformTaskView>, ApiError>;
}
