use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::Media;
use crate::modules::media::application::ports::outgoing::media_repository::MediaRepository;
use crate::shared::api::listing::{apply_listing, matches_filter, ListParams};
use crate::shared::error::StoreError;

/// Mock-mode store with the same unique-`uri` contract as the collection index.
#[derive(Default)]
pub struct InMemoryMediaRepository {
    medias: RwLock<HashMap<Uuid, Media>>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn save(&self, media: &Media) -> Result<(), StoreError> {
        let mut medias = self.medias.write().expect("medias lock");
        let duplicate = medias
            .values()
            .any(|other| other.id != media.id && other.uri == media.uri);
        if duplicate {
            return Err(StoreError::Duplicate { field: "uri" });
        }
        medias.insert(media.id, media.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Media>, StoreError> {
        Ok(self.medias.read().expect("medias lock").get(&id).cloned())
    }

    async fn list(&self, params: ListParams) -> Result<Vec<Media>, StoreError> {
        let serialized: Vec<Value> = self
            .medias
            .read()
            .expect("medias lock")
            .values()
            .map(|media| serde_json::to_value(media).expect("media serializes"))
            .collect();
        apply_listing(serialized, &params)
            .into_iter()
            .map(|value| {
                serde_json::from_value(value).map_err(|e| StoreError::Backend(e.to_string()))
            })
            .collect()
    }

    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError> {
        let medias = self.medias.read().expect("medias lock");
        let count = match filter {
            None => medias.len(),
            Some(filter) => medias
                .values()
                .filter(|media| {
                    let value = serde_json::to_value(media).expect("media serializes");
                    matches_filter(&value, &filter)
                })
                .count(),
        };
        Ok(count as u64)
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.medias.write().expect("medias lock").clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::application::domain::entities::MediaStatus;
    use serde_json::{json, Map};

    fn media(uri: &str, title: &str) -> Media {
        let mut metadata = Map::new();
        metadata.insert("title".to_string(), json!(title));
        Media::new(
            Uuid::new_v4(),
            None,
            uri,
            "f.mp4",
            metadata,
            MediaStatus::Ready,
        )
    }

    #[tokio::test]
    async fn uri_is_unique() {
        let repo = InMemoryMediaRepository::new();
        repo.save(&media("uri://a", "A")).await.unwrap();
        let err = repo.save(&media("uri://a", "B")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "uri" }));
    }

    #[tokio::test]
    async fn listing_sorts_by_metadata_title() {
        let repo = InMemoryMediaRepository::new();
        repo.save(&media("uri://b", "Beta")).await.unwrap();
        repo.save(&media("uri://a", "Alpha")).await.unwrap();
        let params = ListParams {
            sort: vec![(
                "metadata.title".to_string(),
                crate::shared::api::listing::SortOrder::Ascending,
            )],
            ..ListParams::default()
        };
        let medias = repo.list(params).await.unwrap();
        assert_eq!(medias[0].title(), Some("Alpha"));
    }
}
