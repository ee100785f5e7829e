use async_trait::async_trait;

use crate::modules::media::application::domain::entities::Media;
use crate::shared::error::ApiError;

/// Shared-storage port. `add_media` moves a freshly uploaded asset from the
/// staging area to its canonical path (rewriting `media.uri`) and probes it;
/// PENDING medias are not yet materialized and probe as `(0, None)`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Returns the directory size in bytes and the media duration.
    async fn add_media(&self, media: &mut Media) -> Result<(u64, Option<String>), ApiError>;

    /// Remove the media's directory tree; absent paths are not an error.
    async fn delete_media(&self, media: &Media) -> Result<(), ApiError>;
}
