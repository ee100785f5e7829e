use async_trait::async_trait;
use serde_json::Value;

use crate::modules::transform::application::domain::entities::TransformTask;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;

/// Persistence port of the `transform_tasks` collection. Task ids are the
/// worker-assigned identifiers, stored as strings.
#[async_trait]
pub trait TransformTaskRepository: Send + Sync {
    async fn save(&self, task: &TransformTask) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TransformTask>, StoreError>;
    async fn find_one(&self, filter: Value) -> Result<Option<TransformTask>, StoreError>;
    async fn list(&self, params: ListParams) -> Result<Vec<TransformTask>, StoreError>;
    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError>;
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
    async fn flush(&self) -> Result<(), StoreError>;
}
