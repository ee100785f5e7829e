use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::modules::scaling::application::domain::entities::EnvironmentSpec;
use crate::modules::scaling::application::ports::incoming::use_cases::add_environment::AddEnvironmentUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct AddEnvironment {
    context: Arc<ScalingService>,
}

impl AddEnvironment {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl AddEnvironmentUseCase for AddEnvironment {
    async fn execute(&self, spec: &EnvironmentSpec) -> Result<(), ApiError> {
        self.context.cluster().add_environment(spec).await?;
        info!(environment = %spec.name, "Environment added");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::scaling::adapter::outgoing::simulated_cluster::SimulatedCluster;
    use crate::modules::scaling::application::ports::incoming::use_cases::list_environments::ListEnvironmentsUseCase;
    use crate::modules::scaling::application::use_cases::list_environments::ListEnvironments;

    fn spec(name: &str) -> EnvironmentSpec {
        EnvironmentSpec {
            name: name.to_string(),
            kind: "ec2".to_string(),
            region: "eu-west-1".to_string(),
            access_key: "AK".to_string(),
            secret_key: "SK".to_string(),
            control_bucket: "bucket".to_string(),
        }
    }

    #[tokio::test]
    async fn adding_an_environment_grows_the_count() {
        let context = Arc::new(ScalingService::new(
            Arc::new(SimulatedCluster::new("default")),
            "oscied-transform",
            "oscied-publisher",
        ));
        let list = ListEnvironments::new(context.clone());
        assert_eq!(list.count().await.unwrap(), 1);

        AddEnvironment::new(context)
            .execute(&spec("amazon"))
            .await
            .unwrap();
        assert_eq!(list.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_environments_are_refused() {
        let context = Arc::new(ScalingService::new(
            Arc::new(SimulatedCluster::new("default")),
            "oscied-transform",
            "oscied-publisher",
        ));
        let add = AddEnvironment::new(context);
        add.execute(&spec("amazon")).await.unwrap();
        let err = add.execute(&spec("amazon")).await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }
}
