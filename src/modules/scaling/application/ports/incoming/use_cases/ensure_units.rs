use async_trait::async_trait;

use crate::modules::scaling::application::domain::entities::ServiceKind;
use crate::shared::error::ApiError;

#[async_trait]
pub trait EnsureUnitsUseCase: Send + Sync {
    async fn execute(
        &self,
        kind: ServiceKind,
        environment: &str,
        num_units: u32,
    ) -> Result<(), ApiError>;
}
