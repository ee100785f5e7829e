use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::modules::scaling::application::domain::entities::{ServiceKind, Unit};
use crate::shared::error::ApiError;

#[async_trait]
pub trait ListUnitsUseCase: Send + Sync {
    async fn execute(
        &self,
        kind: ServiceKind,
        environment: &str,
    ) -> Result<BTreeMap<u32, Unit>, ApiError>;
}
