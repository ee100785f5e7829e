use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublisherTaskStatus {
    Pending,
    Progress,
    Success,
    Failure,
    Revoking,
    Revoked,
}

impl PublisherTaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Progress => "PROGRESS",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Revoking => "REVOKING",
            Self::Revoked => "REVOKED",
        }
    }

    /// SUCCESS is final for the publish flow but still opens the unpublish
    /// round-trip (SUCCESS -> REVOKING -> REVOKED).
    pub fn can_become(&self, next: PublisherTaskStatus) -> bool {
        use PublisherTaskStatus::*;
        matches!(
            (self, next),
            (Pending, Progress)
                | (Pending, Success)
                | (Pending, Failure)
                | (Pending, Revoked)
                | (Progress, Success)
                | (Progress, Failure)
                | (Progress, Revoked)
                | (Success, Revoking)
                | (Revoking, Revoked)
        )
    }
}

/// A publication job; `publish_uri` is set on SUCCESS and `revoke_task_id`
/// links the unpublish job while the task is REVOKING.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherTask {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: Uuid,
    pub media_id: Uuid,
    pub send_email: bool,
    #[serde(default)]
    pub revoked: bool,
    pub status: PublisherTaskStatus,
    pub publish_uri: Option<String>,
    pub revoke_task_id: Option<String>,
    #[serde(default)]
    pub statistic: Map<String, Value>,
}

impl PublisherTask {
    pub fn new(id: &str, user_id: Uuid, media_id: Uuid, send_email: bool) -> Self {
        Self {
            id: id.to_string(),
            user_id,
            media_id,
            send_email,
            revoked: false,
            status: PublisherTaskStatus::Pending,
            publish_uri: None,
            revoke_task_id: None,
            statistic: Map::new(),
        }
    }

    pub fn add_statistic(&mut self, key: &str, value: Value, overwrite: bool) {
        if overwrite || !self.statistic.contains_key(key) {
            self.statistic.insert(key.to_string(), value);
        }
    }

    pub fn transition(&mut self, next: PublisherTaskStatus) -> bool {
        if self.status.can_become(next) {
            self.status = next;
            true
        } else {
            false
        }
    }

    /// The unpublish job must reach the very worker serving the copy; its
    /// queue is named after the host of the published URL.
    pub fn publish_hostname(&self) -> Option<String> {
        let uri = self.publish_uri.as_deref()?;
        let rest = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
        let host = rest.split(['/', ':']).next()?;
        if host.is_empty() {
            None
        } else {
            Some(host.to_string())
        }
    }
}
