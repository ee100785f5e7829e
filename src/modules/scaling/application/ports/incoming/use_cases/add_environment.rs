use async_trait::async_trait;

use crate::modules::scaling::application::domain::entities::EnvironmentSpec;
use crate::shared::error::ApiError;

#[async_trait]
pub trait AddEnvironmentUseCase: Send + Sync {
    async fn execute(&self, spec: &EnvironmentSpec) -> Result<(), ApiError>;
}
