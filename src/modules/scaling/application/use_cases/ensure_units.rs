use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::modules::scaling::application::ports::incoming::use_cases::ensure_units::EnsureUnitsUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct EnsureUnits {
    context: Arc<ScalingService>,
}

impl EnsureUnits {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl EnsureUnitsUseCase for EnsureUnits {
    async fn execute(
        &self,
        kind: ServiceKind,
        environment: &str,
        num_units: u32,
    ) -> Result<(), ApiError> {
        let lock = self.context.environment_lock(environment);
        let _guard = lock.lock().await;
        let service = self.context.service_name(kind);
        self.context
            .cluster()
            .ensure_num_units(environment, service, num_units)
            .await?;
        info!(environment, service, num_units, "Ensured units");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::scaling::adapter::outgoing::simulated_cluster::SimulatedCluster;
    use crate::modules::scaling::application::ports::incoming::use_cases::list_units::ListUnitsUseCase;
    use crate::modules::scaling::application::use_cases::list_units::ListUnits;

    #[tokio::test]
    async fn ensure_grows_the_fleet_to_the_requested_size() {
        let context = Arc::new(ScalingService::new(
            Arc::new(SimulatedCluster::new("default")),
            "oscied-transform",
            "oscied-publisher",
        ));
        EnsureUnits::new(context.clone())
            .execute(ServiceKind::Transform, "default", 2)
            .await
            .unwrap();
        let units = ListUnits::new(context)
            .execute(ServiceKind::Transform, "default")
            .await
            .unwrap();
        assert_eq!(units.len(), 2);
    }
}
