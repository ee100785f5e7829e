use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::modules::transform::application::ports::outgoing::profile_repository::TransformProfileRepository;
use crate::shared::api::listing::{apply_listing, matches_filter, ListParams};
use crate::shared::error::StoreError;

/// Mock-mode store with the unique-`title` contract of the collection index.
#[derive(Default)]
pub struct InMemoryTransformProfileRepository {
    profiles: RwLock<HashMap<Uuid, TransformProfile>>,
}

impl InMemoryTransformProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransformProfileRepository for InMemoryTransformProfileRepository {
    async fn save(&self, profile: &TransformProfile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().expect("profiles lock");
        let duplicate = profiles
            .values()
            .any(|other| other.id != profile.id && other.title == profile.title);
        if duplicate {
            return Err(StoreError::Duplicate { field: "title" });
        }
        profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TransformProfile>, StoreError> {
        Ok(self.profiles.read().expect("profiles lock").get(&id).cloned())
    }

    async fn list(&self, params: ListParams) -> Result<Vec<TransformProfile>, StoreError> {
        let serialized: Vec<Value> = self
            .profiles
            .read()
            .expect("profiles lock")
            .values()
            .map(|profile| serde_json::to_value(profile).expect("profile serializes"))
            .collect();
        apply_listing(serialized, &params)
            .into_iter()
            .map(|value| {
                serde_json::from_value(value).map_err(|e| StoreError::Backend(e.to_string()))
            })
            .collect()
    }

    async fn count(&self, filter: Option<Value>) -> Result<u64, StoreError> {
        let profiles = self.profiles.read().expect("profiles lock");
        let count = match filter {
            None => profiles.len(),
            Some(filter) => profiles
                .values()
                .filter(|profile| {
                    let value = serde_json::to_value(profile).expect("profile serializes");
                    matches_filter(&value, &filter)
                })
                .count(),
        };
        Ok(count as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .profiles
            .write()
            .expect("profiles lock")
            .remove(&id)
            .is_some())
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.profiles.write().expect("profiles lock").clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn title_is_unique() {
        let repo = InMemoryTransformProfileRepository::new();
        let a = TransformProfile::new("To MP4", "", "ffmpeg", "-f mp4");
        let b = TransformProfile::new("To MP4", "", "copy", "");
        repo.save(&a).await.unwrap();
        assert!(matches!(
            repo.save(&b).await.unwrap_err(),
            StoreError::Duplicate { field: "title" }
        ));
    }
}
