use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::modules::scaling::application::ports::incoming::use_cases::destroy_unit::DestroyUnitUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct DestroyUnit {
    context: Arc<ScalingService>,
}

impl DestroyUnit {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl DestroyUnitUseCase for DestroyUnit {
    async fn execute(
        &self,
        kind: ServiceKind,
        environment: &str,
        number: u32,
    ) -> Result<(), ApiError> {
        let lock = self.context.environment_lock(environment);
        let _guard = lock.lock().await;
        self.context
            .cluster()
            .destroy_unit(environment, self.context.service_name(kind), number, true)
            .await
    }
}
