use async_trait::async_trait;

use crate::modules::scaling::application::domain::entities::{ServiceKind, Unit};
use crate::shared::error::ApiError;

#[async_trait]
pub trait FetchUnitUseCase: Send + Sync {
    async fn execute(
        &self,
        kind: ServiceKind,
        environment: &str,
        number: u32,
    ) -> Result<Unit, ApiError>;
}
