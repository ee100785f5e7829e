use std::sync::Arc;

use crate::modules::scaling::application::ports::incoming::use_cases::{
    add_environment::AddEnvironmentUseCase, destroy_environment::DestroyEnvironmentUseCase,
    destroy_unit::DestroyUnitUseCase, ensure_units::EnsureUnitsUseCase,
    fetch_environment::FetchEnvironmentUseCase, fetch_unit::FetchUnitUseCase,
    list_environments::ListEnvironmentsUseCase, list_units::ListUnitsUseCase,
};
use crate::modules::scaling::application::services::scaling_service::ScalingService;
use crate::modules::scaling::application::use_cases::{
    add_environment::AddEnvironment, destroy_environment::DestroyEnvironment,
    destroy_unit::DestroyUnit, ensure_units::EnsureUnits, fetch_environment::FetchEnvironment,
    fetch_unit::FetchUnit, list_environments::ListEnvironments, list_units::ListUnits,
};

/// The fleet use cases, composed over the shared scaling context.
#[derive(Clone)]
pub struct ScalingOperations {
    pub list_environments: Arc<dyn ListEnvironmentsUseCase>,
    pub fetch_environment: Arc<dyn FetchEnvironmentUseCase>,
    pub add_environment: Arc<dyn AddEnvironmentUseCase>,
    pub destroy_environment: Arc<dyn DestroyEnvironmentUseCase>,
    pub list_units: Arc<dyn ListUnitsUseCase>,
    pub fetch_unit: Arc<dyn FetchUnitUseCase>,
    pub ensure_units: Arc<dyn EnsureUnitsUseCase>,
    pub destroy_unit: Arc<dyn DestroyUnitUseCase>,
}

impl ScalingOperations {
    pub fn new(context: Arc<ScalingService>) -> Self {
        Self {
            list_environments: Arc::new(ListEnvironments::new(context.clone())),
            fetch_environment: Arc::new(FetchEnvironment::new(context.clone())),
            add_environment: Arc::new(AddEnvironment::new(context.clone())),
            destroy_environment: Arc::new(DestroyEnvironment::new(context.clone())),
            list_units: Arc::new(ListUnits::new(context.clone())),
            fetch_unit: Arc::new(FetchUnit::new(context.clone())),
            ensure_units: Arc::new(EnsureUnits::new(context.clone())),
            destroy_unit: Arc::new(DestroyUnit::new(context)),
        }
    }
}
