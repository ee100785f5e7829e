use async_trait::async_trait;
use serde_json::Value;

use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;

/// Persistence port of the `publisher_tasks` collection.
#[async_trait]
pub trait PublisherTaskRepository: Send + Sync {
    async fn save(&self, task: &PublisherTask) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<PublisherTask>, StoreError>;
    async fn find_one(&self, filter: Value) -> Result<Option<PublisherTask>, StoreError>;
    async fn list(&self, params: ListParams) -> Result<Vec<PublisherTask>, StoreError>;
    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError>;
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
    async fn flush(&self) -> Result<(), StoreError>;
}
