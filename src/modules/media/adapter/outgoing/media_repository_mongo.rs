use async_trait::async_trait;
use bson::doc;
use futures::stream::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde_json::Value;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::Media;
use crate::modules::media::application::ports::outgoing::media_repository::MediaRepository;
use crate::shared::api::listing::ListParams;
use crate::shared::error::StoreError;
use crate::shared::store::{backend, id_filter, is_duplicate_key, to_filter_doc, to_sort_doc};

pub struct MongoMediaRepository {
    collection: Collection<Media>,
}

impl MongoMediaRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("medias"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let model = IndexModel::builder()
            .keys(doc! {"uri": 1})
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(model).await.map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl MediaRepository for MongoMediaRepository {
    async fn save(&self, media: &Media) -> Result<(), StoreError> {
        let result = self
            .collection
            .replace_one(id_filter(media.id), media)
            .upsert(true)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(error) if is_duplicate_key(&error) => Err(StoreError::Duplicate { field: "uri" }),
            Err(error) => Err(backend(error)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Media>, StoreError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(backend)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<Media>, StoreError> {
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

    async fn flush(&self) -> Result<(), StoreError> {
        self.collection.drop().await.map_err(backend)?;
        self.ensure_indexes().await
    }
}
