use std::sync::RwLock;

use async_trait::async_trait;
use rand::Rng;
use uuid::Uuid;

use crate::modules::media::application::domain::entities::{Media, MediaStatus};
use crate::modules::media::application::ports::outgoing::blob_store::BlobStore;
use crate::shared::error::ApiError;

/// Mock-mode storage: nothing is moved, sizes and durations are invented.
#[derive(Default)]
pub struct InMemoryBlobStore {
    deleted: RwLock<Vec<Uuid>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the medias whose storage was cleaned, for assertions.
    pub fn deleted(&self) -> Vec<Uuid> {
        self.deleted.read().expect("deleted lock").clone()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn add_media(&self, media: &mut Media) -> Result<(u64, Option<String>), ApiError> {
        if media.status == MediaStatus::Pending {
            return Ok((0, None));
        }
        let mut rng = rand::thread_rng();
        let size = rng.gen_range(10 * 1024 * 1024..10 * 1024 * 1024 * 1024u64);
        let duration = format!(
            "{:02}:{:02}:{:02}",
            rng.gen_range(0..3),
            rng.gen_range(0..60),
            rng.gen_range(0..60)
        );
        Ok((size, Some(duration)))
    }

    async fn delete_media(&self, media: &Media) -> Result<(), ApiError> {
        self.deleted.write().expect("deleted lock").push(media.id);
        Ok(())
    }
}
