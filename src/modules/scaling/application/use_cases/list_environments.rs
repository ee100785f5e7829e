use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::modules::scaling::application::ports::incoming::use_cases::list_environments::ListEnvironmentsUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct ListEnvironments {
    context: Arc<ScalingService>,
}

impl ListEnvironments {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ListEnvironmentsUseCase for ListEnvironments {
    async fn execute(&self, with_status: bool) -> Result<Value, ApiError> {
        let cluster = self.context.cluster();
        let (environments, default) = cluster.environments().await?;
        if !with_status {
            return Ok(json!({"environments": environments, "default": default}));
        }
        let mut detailed = Vec::with_capacity(environments.len());
        for name in &environments {
            detailed.push(cluster.environment_status(name).await?);
        }
        Ok(json!({"environments": detailed, "default": default}))
    }

    async fn count(&self) -> Result<usize, ApiError> {
        let (environments, _) = self.context.cluster().environments().await?;
        Ok(environments.len())
    }
}
