use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::modules::media::application::domain::entities::{Media, MediaStatus};
use crate::modules::media::application::domain::storage_layout::StorageLayout;
use crate::modules::media::application::ports::outgoing::blob_store::BlobStore;
use crate::shared::error::ApiError;

const RENAME_ATTEMPTS: u32 = 5;
const RENAME_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Shared-storage adapter over the mounted glusterfs volume. Duration
/// probing shells out to ffprobe, the tool the workers themselves rely on.
pub struct FsBlobStore {
    layout: StorageLayout,
    probe_timeout: Duration,
}

impl FsBlobStore {
    pub fn new(layout: StorageLayout, probe_timeout: Duration) -> Self {
        Self {
            layout,
            probe_timeout,
        }
    }

    async fn rename_with_retry(&self, src: &Path, dst: &Path) -> Result<(), ApiError> {
        if let Some(parent) = dst.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ApiError::internal(format!("Cannot create {parent:?}: {e}")))?;
        }
        let mut last_error = None;
        for attempt in 0..RENAME_ATTEMPTS {
            match tokio::fs::rename(src, dst).await {
                Ok(()) => return Ok(()),
                Err(error) => {
                    last_error = Some(error);
                    if attempt + 1 < RENAME_ATTEMPTS {
                        tokio::time::sleep(RENAME_RETRY_DELAY).await;
                    }
                }
            }
        }
        Err(ApiError::invalid(format!(
            "An error occured : {} ({src:?} -> {dst:?}).",
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    async fn directory_size(&self, path: &Path) -> Result<u64, ApiError> {
        let root = path.to_path_buf();
        tokio::task::spawn_blocking(move || walk_size(&root))
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .map_err(|e| ApiError::invalid(format!("Unable to detect size of media: {e}.")))
    }

    async fn media_duration(&self, path: &Path) -> Result<String, ApiError> {
        let output = tokio::time::timeout(
            self.probe_timeout,
            Command::new("ffprobe")
                .args([
                    "-v",
                    "error",
                    "-show_entries",
                    "format=duration",
                    "-of",
                    "default=noprint_wrappers=1:nokey=1",
                ])
                .arg(path)
                .output(),
        )
        .await
        .map_err(|_| ApiError::transient("Media duration probe timed out."))?
        .map_err(|e| ApiError::invalid(format!("Unable to detect duration of media: {e}.")))?;
        let seconds: f64 = String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .map_err(|_| {
                ApiError::invalid(format!("Unable to detect duration of media {path:?}."))
            })?;
        Ok(format_duration(seconds))
    }
}

fn walk_size(path: &Path) -> std::io::Result<u64> {
    let mut total = 0;
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_dir() {
            total += walk_size(&entry.path())?;
        } else {
            total += metadata.len();
        }
    }
    Ok(total)
}

fn format_duration(seconds: f64) -> String {
    let whole = seconds.max(0.0);
    let hours = (whole / 3600.0) as u64;
    let minutes = ((whole % 3600.0) / 60.0) as u64;
    let secs = whole % 60.0;
    format!("{hours:02}:{minutes:02}:{secs:05.2}")
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn add_media(&self, media: &mut Media) -> Result<(u64, Option<String>), ApiError> {
        if media.status == MediaStatus::Pending {
            // The worker has not produced the file yet.
            return Ok((0, None));
        }
        let src = self.layout.uri_to_path(&media.uri).ok_or_else(|| {
            ApiError::not_implemented("Registration of external media assets is not implemented.")
        })?;
        let dst = self.layout.media_path(media);
        if src != dst {
            self.rename_with_retry(&src, &dst).await?;
            media.uri = self.layout.media_uri(media);
        }
        let directory = dst
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dst.clone());
        let size = self.directory_size(&directory).await?;
        let duration = self.media_duration(&dst).await?;
        Ok((size, Some(duration)))
    }

    async fn delete_media(&self, media: &Media) -> Result<(), ApiError> {
        let Some(path) = self.layout.uri_to_path(&media.uri) else {
            return Err(ApiError::not_implemented(
                "Deletion of external media assets is not implemented.",
            ));
        };
        let Some(directory) = path.parent() else {
            return Ok(());
        };
        match tokio::fs::remove_dir_all(directory).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ApiError::internal(format!(
                "Cannot delete media directory {directory:?}: {error}"
            ))),
        }
    }
}
