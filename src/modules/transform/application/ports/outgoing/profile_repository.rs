use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;

/// Persistence port of the `transform_profiles` collection; `title` is a
/// unique key.
#[async_trait]
pub trait TransformProfileRepository: Send + Sync {
    async fn save(&self, profile: &TransformProfile) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransformProfile>, StoreError>;
    async fn list(&self, params: ListParams) -> Result<Vec<TransformProfile>, StoreError>;
    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn flush(&self) -> Result<(), StoreError>;
}
