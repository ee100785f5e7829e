use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::transform::application::ports::incoming::use_cases::count_tasks::CountTransformTasksUseCase;
use crate::modules::transform::application::ports::outgoing::task_repository::TransformTaskRepository;
use crate::shared::error::ApiError;

pub struct CountTransformTasks {
    tasks: Arc<dyn TransformTaskRepository>,
}

impl CountTransformTasks {
    pub fn new(tasks: Arc<dyn TransformTaskRepository>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl CountTransformTasksUseCase for CountTransformTasks {
    async fn execute(&self, filter: Option<Value>) -> Result<u64, ApiError> {
        self.tasks.count(filter).await.map_err(ApiError::from)
    }
}
