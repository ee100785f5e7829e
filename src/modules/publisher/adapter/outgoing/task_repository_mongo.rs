use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database};
use serde_json::Value;

use crate::modules::publisher::application::domain::entities::PublisherTask;
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;
use crate::shared::store::{backend, id_filter, to_filter_doc, to_sort_doc};

pub struct MongoPublisherTaskRepository {
    collection: Collection<PublisherTask>,
}

impl MongoPublisherTaskRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("publisher_tasks"),
        }
    }
}

#[async_trait]
impl PublisherTaskRepository for MongoPublisherTaskRepository {
    async fn save(&self, task: &PublisherTask) -> Result<(), StoreError> {
        self.collection
            .replace_one(id_filter(&task.id), task)
            .upsert(true)
            .await
            .map(|_| ())
            .map_err(backend)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PublisherTask>, StoreError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(backend)
    }

    async fn find_one(&self, filter: Value) -> Result<Option<PublisherTask>, StoreError> {
        self.collection
            .find_one(to_filter_doc(&Some(filter))?)
            .await
            .map_err(backend)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<PublisherTask>, StoreError> {
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

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(backend)?;
        Ok(result.deleted_count > 0)
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.collection.drop().await.map_err(backend)
    }
}
