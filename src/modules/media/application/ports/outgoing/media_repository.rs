use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::Media;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;

/// Persistence port of the `medias` collection; `uri` is a unique key.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn save(&self, media: &Media) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Media>, StoreError>;
    async fn list(&self, params: ListParams) -> Result<Vec<Media>, StoreError>;
    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError>;
    async fn flush(&self) -> Result<(), StoreError>;
}
