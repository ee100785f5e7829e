use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::modules::media::application::domain::entities::{Media, MediaStatus, MediaView};
use crate::modules::media::application::domain::storage_layout::StorageLayout;
use crate::modules::media::application::ports::outgoing::{
    blob_store::BlobStore, media_repository::MediaRepository,
};
use crate::modules::publisher::application::ports::outgoing::task_repository::PublisherTaskRepository;
use crate::modules::transform::application::ports::outgoing::task_repository::TransformTaskRepository;
use crate::shared::api::listing::SortOrder;
use crate::shared::clock::datetime_now;
use crate::shared::error::{ApiError, StoreError};

pub const DEFAULT_SORT: [(&str, SortOrder); 1] = [("metadata.title", SortOrder::Ascending)];

/// Statuses during which a task pins the media assets it works on.
const LIVE_TASK_STATUSES: [&str; 2] = ["PENDING", "PROGRESS"];

/// Shared persistence core of the media module: probing saves, guarded
/// deletion and view building. The media use cases compose it, and the task
/// modules reach it when worker callbacks touch medias.
pub struct MediaService {
    medias: Arc<dyn MediaRepository>,
    users: Arc<dyn UserRepository>,
    blobs: Arc<dyn BlobStore>,
    transform_tasks: Arc<dyn TransformTaskRepository>,
    publisher_tasks: Arc<dyn PublisherTaskRepository>,
    layout: StorageLayout,
}

impl MediaService {
    pub fn new(
        medias: Arc<dyn MediaRepository>,
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStore>,
        transform_tasks: Arc<dyn TransformTaskRepository>,
        publisher_tasks: Arc<dyn PublisherTaskRepository>,
        layout: StorageLayout,
    ) -> Self {
        Self {
            medias,
            users,
            blobs,
            transform_tasks,
            publisher_tasks,
            layout,
        }
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Validate and persist a media asset. Non-deleted assets are probed
    /// through the blob store, which also moves freshly uploaded files to
    /// their canonical path; the metadata gains `size`, `duration` and
    /// `add_date`.
    pub async fn save_media(&self, media: &mut Media) -> Result<(), ApiError> {
        media.is_valid()?;
        if media.title().map(str::trim).unwrap_or("").is_empty() {
            return Err(ApiError::invalid(
                "Title key is required in media asset's metadata.",
            ));
        }
        let (size, duration) = if media.status != MediaStatus::Deleted {
            self.blobs.add_media(media).await?
        } else {
            (0, None)
        };
        media.add_metadata("size", json!(size), true);
        if let Some(duration) = duration {
            media.add_metadata("duration", json!(duration), true);
        }
        media.add_metadata("add_date", json!(datetime_now()), false);
        match self.medias.save(media).await {
            Ok(()) => Ok(()),
            Err(StoreError::Duplicate { .. }) => Err(ApiError::invalid(format!(
                "The media URI {} is already used by another media asset.",
                media.uri
            ))),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn get_media(&self, id: Uuid) -> Result<Media, ApiError> {
        self.medias
            .find_by_id(id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::not_found(format!("No media asset with id {id}.")))
    }

    /// Serialized shape of a media, optionally resolving `user_id` and
    /// `parent_id` into embedded payloads (one level, as the API promises).
    pub async fn media_view(&self, media: Media, load_fields: bool) -> Result<MediaView, ApiError> {
        let api_uri = self
            .layout
            .uri_to_path(&media.uri)
            .map(|path| path.to_string_lossy().into_owned());
        if !load_fields {
            return Ok(MediaView {
                media,
                api_uri,
                user: None,
                parent: None,
            });
        }
        let user = self
            .users
            .find_by_id(media.user_id)
            .await
            .map_err(ApiError::from)?
            .map(|user| user.to_view());
        let parent = match media.parent_id {
            Some(parent_id) => self
                .medias
                .find_by_id(parent_id)
                .await
                .map_err(ApiError::from)?
                .map(Box::new),
            None => None,
        };
        Ok(MediaView {
            media,
            api_uri,
            user,
            parent,
        })
    }

    /// Flip an asset to DELETED (the row survives for historical tasks) and
    /// clean its storage. Assets pinned by a live task cannot be deleted.
    pub async fn delete_media(&self, mut media: Media) -> Result<Media, ApiError> {
        let live = json!({
            "media_in_id": media.id.to_string(),
            "status": {"$in": LIVE_TASK_STATUSES},
        });
        if let Some(task) = self
            .transform_tasks
            .find_one(live)
            .await
            .map_err(ApiError::from)?
        {
            return Err(ApiError::invalid(format!(
                "Cannot delete the media asset, it is actually in use by transformation task with id {} and status {}.",
                task.id, task.status.as_str()
            )));
        }
        let live = json!({
            "media_id": media.id.to_string(),
            "status": {"$in": LIVE_TASK_STATUSES},
        });
        if let Some(task) = self
            .publisher_tasks
            .find_one(live)
            .await
            .map_err(ApiError::from)?
        {
            return Err(ApiError::invalid(format!(
                "Cannot delete the media asset, it is actually in use by publication task with id {} and status {}.",
                task.id, task.status.as_str()
            )));
        }
        media.status = MediaStatus::Deleted;
        media.public_uris.clear();
        self.save_media(&mut media).await?;
        self.blobs.delete_media(&media).await?;
        info!(media = %media.id, "Media asset deleted");
        Ok(media)
    }

    /// Store-level listing for internal callers (janitor, observer).
    pub async fn list_medias_raw(
        &self,
        params: crate::shared::api::listing::ListParams,
    ) -> Result<Vec<Media>, ApiError> {
        self.medias.list(params).await.map_err(ApiError::from)
    }

    pub async fn count_medias(&self, filter: Option<Value>) -> Result<u64, ApiError> {
        self.medias.count(filter).await.map_err(ApiError::from)
    }

    pub async fn flush(&self) -> Result<(), ApiError> {
        self.medias.flush().await.map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use crate::modules::auth::adapter::outgoing::user_repository_memory::InMemoryUserRepository;
    use crate::modules::media::adapter::outgoing::blob_store_memory::InMemoryBlobStore;
    use crate::modules::media::adapter::outgoing::media_repository_memory::InMemoryMediaRepository;
    use crate::modules::publisher::adapter::outgoing::task_repository_memory::InMemoryPublisherTaskRepository;
    use crate::modules::transform::adapter::outgoing::task_repository_memory::InMemoryTransformTaskRepository;
    use crate::modules::transform::application::domain::entities::{
        TransformTask, TransformTaskStatus,
    };

    fn metadata(title: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".to_string(), json!(title));
        map
    }

    fn ready_media(user: Uuid, uri: &str, title: &str) -> Media {
        Media::new(user, None, uri, "a.mp4", metadata(title), MediaStatus::Ready)
    }

    fn service() -> (
        MediaService,
        Arc<InMemoryTransformTaskRepository>,
        Arc<InMemoryBlobStore>,
    ) {
        let transform_tasks = Arc::new(InMemoryTransformTaskRepository::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let service = MediaService::new(
            Arc::new(InMemoryMediaRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            blobs.clone(),
            transform_tasks.clone(),
            Arc::new(InMemoryPublisherTaskRepository::new()),
            StorageLayout::new("10.0.0.9", "medias_volume", "/mnt/storage"),
        );
        (service, transform_tasks, blobs)
    }

    #[tokio::test]
    async fn save_probes_and_augments_metadata() {
        let (service, _, _) = service();
        let mut media = ready_media(Uuid::new_v4(), "uri://x", "X");
        service.save_media(&mut media).await.unwrap();
        assert!(media.metadata.contains_key("size"));
        assert!(media.metadata.contains_key("duration"));
        assert!(media.metadata.contains_key("add_date"));
    }

    #[tokio::test]
    async fn missing_title_is_refused() {
        let (service, _, _) = service();
        let mut media = Media::new(
            Uuid::new_v4(),
            None,
            "uri://x",
            "x.mp4",
            Map::new(),
            MediaStatus::Ready,
        );
        let err = service.save_media(&mut media).await.unwrap_err();
        assert!(err.to_string().contains("Title key is required"));
    }

    #[tokio::test]
    async fn duplicate_uri_names_the_field() {
        let (service, _, _) = service();
        let user = Uuid::new_v4();
        let mut first = ready_media(user, "uri://same", "A");
        service.save_media(&mut first).await.unwrap();
        let mut second = ready_media(user, "uri://same", "B");
        let err = service.save_media(&mut second).await.unwrap_err();
        assert!(err.to_string().contains("media URI uri://same"));
    }

    #[tokio::test]
    async fn deletion_is_blocked_while_a_task_uses_the_media() {
        let (service, transform_tasks, _) = service();
        let user = Uuid::new_v4();
        let mut media = ready_media(user, "uri://in-use", "A");
        service.save_media(&mut media).await.unwrap();

        let mut task = TransformTask::new(
            "11111111-2222-3333-4444-555555555555",
            user,
            media.id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            false,
        );
        task.status = TransformTaskStatus::Progress;
        transform_tasks.save(&task).await.unwrap();

        let err = service.delete_media(media).await.unwrap_err();
        assert!(err.to_string().contains("in use by transformation task"));
    }

    #[tokio::test]
    async fn deleted_media_keeps_its_row_and_loses_public_uris() {
        let (service, _, blobs) = service();
        let user = Uuid::new_v4();
        let mut media = ready_media(user, "uri://gone", "A");
        service.save_media(&mut media).await.unwrap();
        media
            .public_uris
            .insert("some-task".to_string(), "http://h/x".to_string());
        service.save_media(&mut media).await.unwrap();

        let deleted = service.delete_media(media.clone()).await.unwrap();
        assert_eq!(deleted.status, MediaStatus::Deleted);
        assert!(deleted.public_uris.is_empty());
        assert_eq!(deleted.metadata["size"], json!(0));
        assert_eq!(blobs.deleted(), vec![media.id]);

        let survivor = service.get_media(media.id).await.unwrap();
        assert_eq!(survivor.status, MediaStatus::Deleted);
    }
}
