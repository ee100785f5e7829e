use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::scaling::application::domain::entities::{ServiceKind, Unit};
use crate::modules::scaling::application::ports::incoming::use_cases::fetch_unit::FetchUnitUseCase;
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::shared::error::ApiError;

pub struct FetchUnit {
    context: Arc<ScalingService>,
}

impl FetchUnit {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl FetchUnitUseCase for FetchUnit {
    async fn execute(
        &self,
        kind: ServiceKind,
        environment: &str,
        number: u32,
    ) -> Result<Unit, ApiError> {
        self.context
            .cluster()
            .list_units(environment, self.context.service_name(kind))
            .await?
            .remove(&number)
            .ok_or_else(|| {
                ApiError::not_found(format!(
                    "{} unit {number} not found in environment {environment}.",
                    capitalize(kind.label())
                ))
            })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::scaling::adapter::outgoing::simulated_cluster::SimulatedCluster;

    #[tokio::test]
    async fn missing_units_are_not_found_with_a_labelled_message() {
        let context = Arc::new(ScalingService::new(
            Arc::new(SimulatedCluster::new("default")),
            "oscied-transform",
            "oscied-publisher",
        ));
        let err = FetchUnit::new(context)
            .execute(ServiceKind::Publisher, "default", 9)
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Publication unit 9 not found in environment default."));
    }
}
