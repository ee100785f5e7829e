use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::scaling::application::ports::incoming::use_cases::fetch_environment::FetchEnvironmentUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct FetchEnvironment {
    context: Arc<ScalingService>,
}

impl FetchEnvironment {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl FetchEnvironmentUseCase for FetchEnvironment {
    async fn execute(&self, name: &str) -> Result<Value, ApiError> {
        self.context.cluster().environment_status(name).await
    }
}
