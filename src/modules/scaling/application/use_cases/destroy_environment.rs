use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::modules::scaling::application::ports::incoming::use_cases::destroy_environment::DestroyEnvironmentUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct DestroyEnvironment {
    context: Arc<ScalingService>,
}

impl DestroyEnvironment {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl DestroyEnvironmentUseCase for DestroyEnvironment {
    async fn execute(&self, name: &str) -> Result<(), ApiError> {
        let lock = self.context.environment_lock(name);
        let _guard = lock.lock().await;
        self.context.cluster().destroy_environment(name).await?;
        info!(environment = %name, "Environment destroyed");
        Ok(())
    }
}
