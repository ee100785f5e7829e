use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::scaling::application::domain::entities::{ServiceKind, Unit};
use crate::modules::scaling::application::ports::incoming::use_cases::list_units::ListUnitsUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct ListUnits {
    context: Arc<ScalingService>,
}

impl ListUnits {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ListUnitsUseCase for ListUnits {
    async fn execute(
        &self,
        kind: ServiceKind,
        environment: &str,
    ) -> Result<BTreeMap<u32, Unit>, ApiError> {
        self.context
            .cluster()
            .list_units(environment, self.context.service_name(kind))
            .await
    }
}
