use std::path::PathBuf;

use super::entities::Media;

pub const MEDIAS_PATH: &str = "medias";
pub const UPLOADS_PATH: &str = "uploads";

/// Deterministic addressing of media assets on the shared storage:
/// `<root>/medias/<user_id>/<media_id>/<filename>` locally,
/// `glusterfs://<address>/<mountpoint>/...` externally.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub address: String,
    pub mountpoint: String,
    pub root_path: PathBuf,
}

impl StorageLayout {
    pub fn new(address: &str, mountpoint: &str, root_path: &str) -> Self {
        Self {
            address: address.to_string(),
            mountpoint: mountpoint.to_string(),
            root_path: PathBuf::from(root_path),
        }
    }

    fn uri_prefix(&self) -> String {
        format!("glusterfs://{}/{}/", self.address, self.mountpoint)
    }

    fn media_relative(&self, media: &Media) -> String {
        format!(
            "{}/{}/{}/{}",
            MEDIAS_PATH, media.user_id, media.id, media.filename
        )
    }

    /// External URI of the canonical media path.
    pub fn media_uri(&self, media: &Media) -> String {
        format!("{}{}", self.uri_prefix(), self.media_relative(media))
    }

    /// Local path of the canonical media location.
    pub fn media_path(&self, media: &Media) -> PathBuf {
        self.root_path.join(self.media_relative(media))
    }

    /// Map a shared-storage URI back to a local path; `None` when the URI
    /// points outside this storage (external assets are unsupported).
    pub fn uri_to_path(&self, uri: &str) -> Option<PathBuf> {
        uri.strip_prefix(&self.uri_prefix())
            .map(|relative| self.root_path.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::application::domain::entities::MediaStatus;
    use serde_json::Map;
    use uuid::Uuid;

    fn layout() -> StorageLayout {
        StorageLayout::new("10.0.0.9", "medias_volume", "/mnt/storage")
    }

    fn media() -> Media {
        Media::new(
            Uuid::new_v4(),
            None,
            "glusterfs://10.0.0.9/medias_volume/uploads/x.mp4",
            "x.mp4",
            Map::new(),
            MediaStatus::Ready,
        )
    }

    #[test]
    fn media_uri_and_path_share_the_relative_layout() {
        let layout = layout();
        let media = media();
        let uri = layout.media_uri(&media);
        assert_eq!(
            uri,
            format!(
                "glusterfs://10.0.0.9/medias_volume/medias/{}/{}/x.mp4",
                media.user_id, media.id
            )
        );
        assert_eq!(layout.uri_to_path(&uri), Some(layout.media_path(&media)));
    }

    #[test]
    fn foreign_uris_do_not_resolve() {
        let layout = layout();
        assert!(layout.uri_to_path("http://elsewhere/x.mp4").is_none());
        assert!(layout
            .uri_to_path("glusterfs://other-host/medias_volume/uploads/x")
            .is_none());
    }

    #[test]
    fn upload_staging_resolves_under_root() {
        let layout = layout();
        let path = layout
            .uri_to_path("glusterfs://10.0.0.9/medias_volume/uploads/clip.mp4")
            .unwrap();
        assert_eq!(path, PathBuf::from("/mnt/storage/uploads/clip.mp4"));
    }
}
