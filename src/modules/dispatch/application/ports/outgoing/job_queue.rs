use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::modules::media::application::domain::entities::Media;
use crate::modules::transform::application::domain::entities::TransformProfile;
use crate::shared::error::ApiError;

/// Where and as whom a worker reports back once its job is done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackSpec {
    pub url: String,
    pub username: String,
    pub secret: String,
}

impl CallbackSpec {
    /// Workers authenticate their callbacks as the `node` principal.
    pub fn node(api_url: &str, callback_path: &str, node_secret: &str) -> Self {
        Self {
            url: format!("{api_url}{callback_path}"),
            username: "node".to_string(),
            secret: node_secret.to_string(),
        }
    }
}

/// The serialized unit of work handed to a worker queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobPayload {
    Transform {
        media_in: Media,
        media_out: Media,
        profile: TransformProfile,
        callback: CallbackSpec,
    },
    Publish {
        media: Media,
        callback: CallbackSpec,
    },
    Unpublish {
        publish_uri: String,
        callback: CallbackSpec,
    },
}

/// Message-bus port. Submitting returns the worker task identifier; a
/// submission that yields no identifier is a transmission failure the caller
/// may retry. Revocation is best-effort and addressed by task identifier.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn submit(&self, queue: &str, payload: &JobPayload) -> Result<String, ApiError>;
    async fn revoke(&self, task_id: &str, terminate: bool) -> Result<(), ApiError>;
}
