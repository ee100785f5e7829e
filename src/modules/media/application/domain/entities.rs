use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserView;
use crate::shared::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Pending,
    Ready,
    Deleted,
}

impl MediaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Ready => "READY",
            Self::Deleted => "DELETED",
        }
    }
}

/// A media asset: immutable content in shared storage, mutable metadata here.
/// `public_uris` maps publication task ids to the public URLs serving the
/// asset; a DELETED media keeps its row so historical tasks stay resolvable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub uri: String,
    #[serde(default)]
    pub public_uris: BTreeMap<String, String>,
    pub filename: String,
    pub metadata: Map<String, Value>,
    pub status: MediaStatus,
}

impl Media {
    pub fn new(
        user_id: Uuid,
        parent_id: Option<Uuid>,
        uri: &str,
        filename: &str,
        metadata: Map<String, Value>,
        status: MediaStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            parent_id,
            uri: uri.to_string(),
            public_uris: BTreeMap::new(),
            filename: normalize_filename(filename),
            metadata,
            status,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }

    pub fn add_metadata(&mut self, key: &str, value: Value, overwrite: bool) {
        if overwrite || !self.metadata.contains_key(key) {
            self.metadata.insert(key.to_string(), value);
        }
    }

    pub fn is_valid(&self) -> Result<(), ApiError> {
        if self.filename.is_empty() {
            return Err(ApiError::invalid("Media asset's filename is required."));
        }
        if self.uri.is_empty() {
            return Err(ApiError::invalid("Media asset's uri is required."));
        }
        Ok(())
    }
}

/// Spaces are not allowed in stored filenames; they become underscores.
pub fn normalize_filename(filename: &str) -> String {
    filename.trim().replace(' ', "_")
}

/// Serialized media, optionally with `user`/`parent` resolved and the local
/// read path appended.
#[derive(Debug, Clone, Serialize)]
pub struct MediaView {
    #[serde(flatten)]
    pub media: Media,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Media>>,
}
