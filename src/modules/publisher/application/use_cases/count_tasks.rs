use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::publisher::application::ports::incoming::use_cases::count_tasks::CountPublisherTasksUseCase;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::shared::error::ApiError;

pub struct CountPublisherTasks {
    tasks: Arc<dyn PublisherTaskRepository>,
}

impl CountPublisherTasks {
    pub fn new(tasks: Arc<dyn PublisherTaskRepository>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl CountPublisherTasksUseCase for CountPublisherTasks {
    async fn execute(&self, filter: Option<Value>) -> Result<u64, ApiError> {
        self.tasks.count(filter).await.map_err(ApiError::from)
    }
}
