use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::shared::error::ApiError;

/// Encoders the transformation workers know how to drive.
pub const ENCODERS: [&str; 3] = ["copy", "ffmpeg", "dashcast"];

/// A named encoder configuration. Immutable once referenced by a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub encoder_name: String,
    pub encoder_string: String,
}

impl TransformProfile {
    pub fn new(title: &str, description: &str, encoder_name: &str, encoder_string: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            description: description.to_string(),
            encoder_name: encoder_name.to_string(),
            encoder_string: encoder_string.to_string(),
        }
    }

    pub fn is_valid(&self) -> Result<(), ApiError> {
        if self.title.is_empty() {
            return Err(ApiError::invalid("Profile's title is required."));
        }
        if !ENCODERS.contains(&self.encoder_name.as_str()) {
            return Err(ApiError::invalid(format!(
                "Encoder name {} is not supported.",
                self.encoder_name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformTaskStatus {
    Pending,
    Progress,
    Success,
    Failure,
    Revoked,
}

impl TransformTaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Progress => "PROGRESS",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Revoked => "REVOKED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::Revoked)
    }

    /// Legal transitions of the task lifecycle; everything else is a stale or
    /// duplicate event and must not mutate the task.
    pub fn can_become(&self, next: TransformTaskStatus) -> bool {
        use TransformTaskStatus::*;
        matches!(
            (self, next),
            (Pending, Progress)
                | (Pending, Success)
                | (Pending, Failure)
                | (Pending, Revoked)
                | (Progress, Success)
                | (Progress, Failure)
                | (Progress, Revoked)
        )
    }
}

/// A transformation job with `_id` equal to the worker-assigned task id.
/// Rows are kept forever; `statistic` accumulates lifecycle measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformTask {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: Uuid,
    pub media_in_id: Uuid,
    pub media_out_id: Uuid,
    pub profile_id: Uuid,
    pub send_email: bool,
    #[serde(default)]
    pub revoked: bool,
    pub status: TransformTaskStatus,
    #[serde(default)]
    pub statistic: Map<String, Value>,
}

impl TransformTask {
    pub fn new(
        id: &str,
        user_id: Uuid,
        media_in_id: Uuid,
        media_out_id: Uuid,
        profile_id: Uuid,
        send_email: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            user_id,
            media_in_id,
            media_out_id,
            profile_id,
            send_email,
            revoked: false,
            status: TransformTaskStatus::Pending,
            statistic: Map::new(),
        }
    }

    pub fn add_statistic(&mut self, key: &str, value: Value, overwrite: bool) {
        if overwrite || !self.statistic.contains_key(key) {
            self.statistic.insert(key.to_string(), value);
        }
    }

    /// Apply a state transition if the machine permits it. Returns whether
    /// the task changed, so duplicate callbacks stay idempotent.
    pub fn transition(&mut self, next: TransformTaskStatus) -> bool {
        if self.status.can_become(next) {
            self.status = next;
            true
        } else {
            false
        }
    }
}

/// Newlines in worker-supplied error reports are escaped before storage so
/// the statistic map stays single-line per key.
pub fn escape_error_details(status: &str) -> String {
    status.replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_rejects_unknown_encoders() {
        let profile = TransformProfile::new("To MP4", "", "x264", "-f mp4");
        assert!(profile.is_valid().is_err());
        let profile = TransformProfile::new("To MP4", "", "ffmpeg", "-f mp4");
        assert!(profile.is_valid().is_ok());
    }

    #[test]
    fn lifecycle_follows_the_state_machine() {
        use TransformTaskStatus::*;
        assert!(Pending.can_become(Progress));
        assert!(Pending.can_become(Success));
        assert!(Progress.can_become(Failure));
        assert!(Progress.can_become(Revoked));
        assert!(!Success.can_become(Failure));
        assert!(!Revoked.can_become(Progress));
        assert!(!Failure.can_become(Success));
        assert!(!Progress.can_become(Progress));
    }

    #[test]
    fn transition_is_idempotent_on_terminal_states() {
        let mut task = TransformTask::new(
            "id",
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            false,
        );
        assert!(task.transition(TransformTaskStatus::Success));
        assert!(!task.transition(TransformTaskStatus::Success));
        assert!(!task.transition(TransformTaskStatus::Failure));
        assert_eq!(task.status, TransformTaskStatus::Success);
    }

    #[test]
    fn statistic_respects_overwrite() {
        let mut task = TransformTask::new(
            "id",
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            false,
        );
        task.add_statistic("add_date", json!("2013-02-11 22:37"), true);
        task.add_statistic("add_date", json!("2014-01-01 00:00"), false);
        assert_eq!(task.statistic["add_date"], json!("2013-02-11 22:37"));
    }

    #[test]
    fn error_details_lose_raw_newlines() {
        assert_eq!(
            escape_error_details("ERROR\nbad codec"),
            "ERROR\\nbad codec"
        );
    }

    #[test]
    fn status_serializes_screaming() {
        assert_eq!(
            serde_json::to_value(TransformTaskStatus::Pending).unwrap(),
            json!("PENDING")
        );
        assert_eq!(
            serde_json::to_value(TransformTaskStatus::Revoked).unwrap(),
            json!("REVOKED")
        );
    }
}
