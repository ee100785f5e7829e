use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;

/// Persistence port of the `users` collection. `save` upserts by `_id` and
/// reports a duplicate `mail` through `StoreError::Duplicate`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_by_mail(&self, mail: &str) -> Result<Option<User>, StoreError>;
    async fn list(&self, params: ListParams) -> Result<Vec<User>, StoreError>;
    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn flush(&self) -> Result<(), StoreError>;
}
