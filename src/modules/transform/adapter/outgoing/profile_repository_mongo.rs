use async_trait::async_trait;
use bson::doc;
use futures::stream::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde_json::Value;
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::modules::transform::application::ports::outgoing::profile_repository::TransformProfileRepository;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;
use crate::shared::store::{backend, id_filter, is_duplicate_key, to_filter_doc, to_sort_doc};

pub struct MongoTransformProfileRepository {
    collection: Collection<TransformProfile>,
}

impl MongoTransformProfileRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("transform_profiles"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let model = IndexModel::builder()
            .keys(doc! {"title": 1})
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(model).await.map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl TransformProfileRepository for MongoTransformProfileRepository {
    async fn save(&self, profile: &TransformProfile) -> Result<(), StoreError> {
        let result = self
            .collection
            .replace_one(id_filter(profile.id), profile)
            .upsert(true)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(error) if is_duplicate_key(&error) => {
                Err(StoreError::Duplicate { field: "title" })
            }
            Err(error) => Err(backend(error)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransformProfile>, StoreError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(backend)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<TransformProfile>, StoreError> {
        let cursor = self
            .collection
            .find(to_filter_doc(&params.filter)?)
            .sort(to_sort_doc(&params.sort))
            .skip(params.skip)
            .limit(params.limit)
            .await
            .map_err(backend)?;
        cursor.try_collect().await.map_err(backend)
    }

    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError> {
        self.collection
            .count_documents(to_filter_doc(&filter)?)
            .await
            .map_err(backend)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(backend)?;
        Ok(result.deleted_count > 0)
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.collection.drop().await.map_err(backend)?;
        self.ensure_indexes().await
    }
}
